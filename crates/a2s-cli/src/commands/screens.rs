use a2s_application::ShowroomUseCase;
use a2s_core::workflow::gate;
use a2s_infrastructure::TomlConfigRepository;
use anyhow::Result;

/// Prints each screen, whether a fresh session may enter it, and what it
/// requires.
pub async fn run(repository: &TomlConfigRepository) -> Result<()> {
    let (usecase, _events) = ShowroomUseCase::bootstrap(repository).await?;
    let current = usecase.current_screen().await;

    println!("{:<2}{:<12}{:<8}REQUIRES", "", "SCREEN", "GATE");
    for (screen, open) in usecase.gate_report().await {
        let marker = if screen == current { "*" } else { "" };
        let status = if open { "open" } else { "locked" };
        println!(
            "{:<2}{:<12}{:<8}{}",
            marker,
            screen.to_string(),
            status,
            gate::requirement(screen)
        );
    }
    Ok(())
}
