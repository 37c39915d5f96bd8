//! Slash-command parsing for the REPL.

use a2s_core::catalog::{BUDGET_PRESETS, CATEGORIES, DELIVERY_SLOTS};
use a2s_core::placement::Position;
use a2s_core::pricing::PaymentMethod;
use a2s_core::state::{RoomType, StylePreference, UserPatch};
use a2s_execution::TaskId;
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go { screen: String, fields: Option<Value> },
    Update(Value),
    Status,
    Gates,
    Catalog { category: String, query: String },
    Experts,
    /// Vendor directory, optionally with each vendor's quote for an item.
    Vendors { item: Option<String> },
    Layout,
    Place { item: String, position: Position },
    Move { item: String, position: Position },
    /// Clockwise quarter turns; negative turns counter-clockwise.
    Rotate { item: String, turns: i32 },
    Remove(String),
    Upload(UserPatch),
    /// `slot` is an index into `DELIVERY_SLOTS`.
    Pay { method: PaymentMethod, slot: usize },
    Chat(String),
    Tasks,
    Cancel(TaskId),
    Help,
}

pub const HELP: &str = "\
/go <screen> [json]        leave the current screen, reporting json fields
/update <json>             report progress without leaving the screen
/status                    show the current screen and state
/gates                     show which screens can be entered
/catalog [category] [text] browse furniture
/experts                   list design experts and consultation slots
/vendors [item]            list local vendors, with quotes for an item
/layout                    show placed furniture and layout warnings
/place <item> <x> <y>      place a cart item (x, y in % of the room plan)
/move <item> <x> <y>       move a placed item
/rotate <item> [turns]     rotate a placed item by 90° steps
/remove <item>             take an item off the plan
/upload <budget> <room> [style]  simulate the room video upload
/pay [method] [slot]       simulate payment (upi, card, wallet, cod)
/chat <message>            message the design expert
/tasks                     list pending simulations
/cancel <task-id>          cancel a pending simulation
quit                       exit";

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "/go" => {
            let (screen, json) = match rest.split_once(char::is_whitespace) {
                Some((screen, json)) => (screen, json.trim()),
                None => (rest, ""),
            };
            if screen.is_empty() {
                bail!("usage: /go <screen> [json]");
            }
            let fields = if json.is_empty() { None } else { Some(parse_json(json)?) };
            Ok(Command::Go {
                screen: screen.to_string(),
                fields,
            })
        }
        "/update" => {
            if rest.is_empty() {
                bail!("usage: /update <json>");
            }
            Ok(Command::Update(parse_json(rest)?))
        }
        "/status" => Ok(Command::Status),
        "/gates" => Ok(Command::Gates),
        "/catalog" => Ok(parse_catalog(rest)),
        "/experts" => Ok(Command::Experts),
        "/vendors" => Ok(Command::Vendors {
            item: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "/layout" => Ok(Command::Layout),
        "/place" => {
            let (item, position) = parse_placement("/place", rest)?;
            Ok(Command::Place { item, position })
        }
        "/move" => {
            let (item, position) = parse_placement("/move", rest)?;
            Ok(Command::Move { item, position })
        }
        "/rotate" => parse_rotate(rest),
        "/remove" => match rest.split_whitespace().next() {
            Some(item) => Ok(Command::Remove(item.to_string())),
            None => bail!("usage: /remove <item>"),
        },
        "/upload" => parse_upload(rest).map(Command::Upload),
        "/pay" => parse_pay(rest),
        "/chat" => Ok(Command::Chat(rest.to_string())),
        "/tasks" => Ok(Command::Tasks),
        "/cancel" => TaskId::parse(rest)
            .map(Command::Cancel)
            .ok_or_else(|| anyhow!("usage: /cancel <task-id>")),
        "/help" => Ok(Command::Help),
        other => bail!("Unknown command '{}', try /help", other),
    }
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("'{}' is not valid JSON", text))
}

fn parse_catalog(rest: &str) -> Command {
    let mut words = rest.splitn(2, char::is_whitespace);
    let first = words.next().unwrap_or_default();
    if CATEGORIES.iter().any(|c| c.id == first) {
        Command::Catalog {
            category: first.to_string(),
            query: words.next().unwrap_or_default().trim().to_string(),
        }
    } else {
        Command::Catalog {
            category: "all".to_string(),
            query: rest.to_string(),
        }
    }
}

fn parse_placement(command: &str, rest: &str) -> Result<(String, Position)> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    let [item, x, y] = words[..] else {
        bail!("usage: {} <item> <x> <y>", command);
    };
    let x: f64 = x.parse().context("x must be a number")?;
    let y: f64 = y.parse().context("y must be a number")?;
    Ok((item.to_string(), Position::new(x, y)))
}

fn parse_rotate(rest: &str) -> Result<Command> {
    let mut words = rest.split_whitespace();
    let item = words
        .next()
        .ok_or_else(|| anyhow!("usage: /rotate <item> [turns]"))?;
    let turns = match words.next() {
        Some(n) => n.parse().context("turns must be a whole number")?,
        None => 1,
    };
    Ok(Command::Rotate {
        item: item.to_string(),
        turns,
    })
}

fn parse_upload(rest: &str) -> Result<UserPatch> {
    let mut words = rest.split_whitespace();
    let presets = BUDGET_PRESETS
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let budget: f64 = words
        .next()
        .ok_or_else(|| anyhow!("usage: /upload <budget> <room> [style], e.g. budget {}", presets))?
        .parse()
        .context("budget must be a number")?;
    let room_type: RoomType = words
        .next()
        .ok_or_else(|| anyhow!("room type required: bedroom, living, kitchen or office"))?
        .parse()
        .context("unknown room type")?;
    let style_preference = words
        .next()
        .map(|s| s.parse::<StylePreference>())
        .transpose()
        .context("unknown style")?;

    Ok(UserPatch {
        budget: Some(budget),
        room_type: Some(room_type),
        style_preference,
    })
}

fn parse_pay(rest: &str) -> Result<Command> {
    let mut words = rest.split_whitespace();
    let method = match words.next() {
        Some(m) => m.parse().context("payment method must be upi, card, wallet or cod")?,
        None => PaymentMethod::default(),
    };
    let slot = match words.next() {
        Some(n) => {
            let n: usize = n.parse().context("slot must be a number")?;
            if n == 0 || n > DELIVERY_SLOTS.len() {
                bail!("slot must be between 1 and {}", DELIVERY_SLOTS.len());
            }
            n - 1
        }
        None => 0,
    };
    Ok(Command::Pay { method, slot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_go_with_payload() {
        let command = parse(r#"/go room {"budget": 30000, "roomType": "bedroom"}"#).unwrap();
        assert_eq!(
            command,
            Command::Go {
                screen: "room".to_string(),
                fields: Some(json!({"budget": 30000, "roomType": "bedroom"})),
            }
        );
    }

    #[test]
    fn test_go_without_payload() {
        assert_eq!(
            parse("/go catalog").unwrap(),
            Command::Go {
                screen: "catalog".to_string(),
                fields: None
            }
        );
        assert!(parse("/go").is_err());
        assert!(parse("/go room {broken").is_err());
    }

    #[test]
    fn test_catalog_category_and_query() {
        assert_eq!(
            parse("/catalog lighting lamp").unwrap(),
            Command::Catalog {
                category: "lighting".to_string(),
                query: "lamp".to_string()
            }
        );
        assert_eq!(
            parse("/catalog oak table").unwrap(),
            Command::Catalog {
                category: "all".to_string(),
                query: "oak table".to_string()
            }
        );
    }

    #[test]
    fn test_upload_arguments() {
        let Command::Upload(patch) = parse("/upload 30000 bedroom modern").unwrap() else {
            panic!("expected upload");
        };
        assert_eq!(patch.budget, Some(30000.0));
        assert_eq!(patch.room_type, Some(RoomType::Bedroom));
        assert_eq!(patch.style_preference, Some(StylePreference::Modern));

        assert!(parse("/upload lots bedroom").is_err());
        assert!(parse("/upload 30000 garage").is_err());
    }

    #[test]
    fn test_pay_defaults_and_bounds() {
        assert_eq!(
            parse("/pay").unwrap(),
            Command::Pay {
                method: PaymentMethod::Upi,
                slot: 0
            }
        );
        assert_eq!(
            parse("/pay cod 2").unwrap(),
            Command::Pay {
                method: PaymentMethod::Cod,
                slot: 1
            }
        );
        assert!(parse("/pay cod 0").is_err());
        assert!(parse("/pay cheque").is_err());
    }

    #[test]
    fn test_layout_commands() {
        assert_eq!(
            parse("/place oak-study-table 40 60").unwrap(),
            Command::Place {
                item: "oak-study-table".to_string(),
                position: Position::new(40.0, 60.0)
            }
        );
        assert_eq!(
            parse("/move oak-study-table 150 10").unwrap(),
            Command::Move {
                item: "oak-study-table".to_string(),
                position: Position::new(100.0, 10.0)
            }
        );
        assert!(parse("/place oak-study-table 40").is_err());
        assert!(parse("/move oak-study-table left 10").is_err());
    }

    #[test]
    fn test_rotate_defaults_to_one_turn() {
        assert_eq!(
            parse("/rotate ergonomic-chair").unwrap(),
            Command::Rotate {
                item: "ergonomic-chair".to_string(),
                turns: 1
            }
        );
        assert_eq!(
            parse("/rotate ergonomic-chair -1").unwrap(),
            Command::Rotate {
                item: "ergonomic-chair".to_string(),
                turns: -1
            }
        );
        assert!(parse("/rotate").is_err());
        assert!(parse("/rotate ergonomic-chair 1.5").is_err());
        assert!(parse("/remove").is_err());
    }

    #[test]
    fn test_vendors_with_item() {
        assert_eq!(parse("/vendors").unwrap(), Command::Vendors { item: None });
        assert_eq!(
            parse("/vendors oak study table").unwrap(),
            Command::Vendors {
                item: Some("oak study table".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse("/teleport").is_err());
        assert!(parse("/cancel nope").is_err());
    }
}
