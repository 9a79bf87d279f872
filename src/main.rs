use anyhow::Context;
use anyhow::Result;
use railbird::api::config::EngineConfig;
use railbird::api::engine::Engine;
use railbird::cfr::state::GameState;
use railbird::Arbitrary;

fn main() -> Result<()> {
    logging()?;
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).context("read config")?;
            EngineConfig::from_json(&json)?
        }
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);

    let batch = (0..256).map(|_| GameState::random()).collect::<Vec<_>>();
    let drift = engine.train_intensive(&batch, 100)?;
    log::info!("trained {} states, final drift {:.4}", batch.len(), drift);

    for _ in 0..5 {
        let state = GameState::random();
        match engine.recommend(&state) {
            Ok(recommendation) => log::info!("{} -> {}", state, recommendation),
            Err(e) => log::warn!("{} -> no recommendation: {}", state, e),
        }
    }

    log::info!("{}", engine.status());
    Ok(())
}

fn logging() -> Result<()> {
    use simplelog::ColorChoice;
    use simplelog::CombinedLogger;
    use simplelog::Config;
    use simplelog::LevelFilter;
    use simplelog::TermLogger;
    use simplelog::TerminalMode;
    use simplelog::WriteLogger;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let file = std::fs::File::create(format!(
        "logs/railbird-{}.log",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("system clock before epoch")?
            .as_secs()
    ))
    .context("create log file")?;
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, Config::default(), file),
    ])
    .context("init logger")?;
    Ok(())
}
