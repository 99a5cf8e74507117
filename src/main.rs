use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

use conway::Engine;
use conway::config::Cli;
use conway::engine::RunOutcome;
use conway::render::ConsoleSink;
use conway::render::FrameSink;
use conway::render::TextRenderer;
use conway::timer::IntervalTicker;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, frames to stdout
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("conway=info"))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(filter),
    )?;

    let config = Cli::parse().into_config()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let initial = config.initial.as_deref();
    let mut engine = Engine::with_rng(config.rows, config.cols, initial, &mut rng)
        .context("Failed to create engine")?;

    let mut ticker = IntervalTicker::new(config.interval);
    if let Some(generations) = config.generations {
        ticker = ticker.with_limit(generations);
    }

    let outcome = if config.plain {
        run(&mut engine, &mut TextRenderer::new(std::io::stdout()), &mut ticker)?
    } else {
        run(&mut engine, &mut ConsoleSink::new(), &mut ticker)?
    };

    match outcome {
        RunOutcome::GameOver { generation } => {
            tracing::info!(generation, "everything died");
        }
        RunOutcome::Interrupted { generation } => {
            tracing::info!(generation, population = engine.grid().population(), "stopped");
        }
    }

    Ok(())
}

fn run<S>(
    engine: &mut Engine,
    sink: &mut S,
    ticker: &mut IntervalTicker,
) -> anyhow::Result<RunOutcome>
where
    S: FrameSink<Error = std::io::Error>,
{
    engine.run(sink, ticker).context("Failed to draw frame")
}
