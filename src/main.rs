use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use clap::{CommandFactory, Parser};
use hiptext::cli::{handle_config_action, Args, Command};
use hiptext::config::{self, Config};
use hiptext::decode::{self, DecodeError, MediaKind};
use hiptext::graphic::generate_spectrum;
use hiptext::movie::{Movie, MovieError};
use hiptext::renderer::{FrameObserver, RenderError, RenderSession, Renderer, StepThrough};
use hiptext::terminal::TermSize;

/// Exit status after Ctrl+C, as a shell would report SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Movie(#[from] MovieError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let mut cfg = match Config::load(Some(config_path.as_path())) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    args.apply_to(&mut cfg);

    if let Some(Command::Config { action }) = &args.command {
        if let Err(e) = handle_config_action(action.clone(), &cfg, &config_path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let options = match cfg.render_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let term = TermSize::detect();
    let session = RenderSession::new(term)
        .with_width(cfg.output.width)
        .with_height(cfg.output.height);
    let interrupt = session.interrupt_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        interrupt.store(true, Ordering::SeqCst);
    }) {
        log::warn!("could not install Ctrl+C handler: {}", e);
    }

    log::info!(
        "terminal {}x{}, mode {}",
        term.cols,
        term.rows,
        options.mode.name()
    );
    let renderer = Renderer::new(options);

    let result = if args.spectrum {
        run_spectrum(&renderer, &session)
    } else if let Some(file) = &args.file {
        run_file(&renderer, &session, file, cfg.output.stepthrough)
    } else {
        Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a FILE to render is required unless --spectrum is given",
            )
            .exit()
    };

    match result {
        Ok(()) => {}
        Err(RunError::Render(RenderError::Interrupted)) => {
            log::info!("interrupted");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render a color chart filling the terminal, leaving a line for the prompt.
fn run_spectrum(renderer: &Renderer, session: &RenderSession) -> Result<(), RunError> {
    let term = session.term();
    let height = (term.rows as usize * 2).saturating_sub(2).max(2);
    let chart = generate_spectrum(session.output_width(), height);
    let mut out = BufWriter::new(io::stdout().lock());
    renderer.render(session, &chart, &mut out)?;
    out.flush().map_err(RenderError::from)?;
    Ok(())
}

fn run_file(
    renderer: &Renderer,
    session: &RenderSession,
    path: &Path,
    stepthrough: bool,
) -> Result<(), RunError> {
    match decode::media_kind(path)? {
        MediaKind::Image => {
            let image = decode::load_image(path)?;
            let mut out = BufWriter::new(io::stdout().lock());
            renderer.render(session, &image, &mut out)?;
            out.flush().map_err(RenderError::from)?;
        }
        MediaKind::Movie => {
            let mut movie = Movie::open(path, session.output_width())?;
            let out = BufWriter::new(io::stdout().lock());
            let mut observer: Box<dyn FrameObserver> = if stepthrough {
                Box::new(StepThrough::new(
                    io::BufReader::new(io::stdin()),
                    session.interrupt_handle(),
                ))
            } else {
                Box::new(())
            };
            renderer.play(session, &mut movie, out, &mut *observer)?;
            if let Some(e) = movie.take_error() {
                return Err(e.into());
            }
        }
    }
    Ok(())
}
