use std::io;

use anyhow::Result;
use backtest_chart::{
    adapter::{ChartAdapter, UiEvent},
    cli::Args,
    client::ChartDataClient,
    sample,
    surface::{ChartOptions, TerminalChart},
};
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.to_config();

    let client = if args.sample {
        None
    } else {
        Some(ChartDataClient::new(&config)?)
    };

    let mut adapter = ChartAdapter::new(config, TerminalChart::new(ChartOptions::default()));

    match &client {
        Some(client) => {
            info!("fetching chart data from {}", args.endpoint.as_deref().unwrap_or(""));
            // A failed load renders its error inline; keep the UI up so
            // the message is visible.
            let _ = adapter.load(client).await;
        }
        None => {
            info!("rendering generated sample payload (seed {})", args.seed);
            adapter.apply(sample::sample_chart_data(96, args.seed)?);
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let size = terminal.size()?;
    adapter.handle_event(UiEvent::Resize {
        width: f64::from(size.width),
        height: f64::from(size.height),
    });

    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| adapter.surface().draw(frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                let ev = adapter.surface().crosshair_event(mouse.column, mouse.row);
                adapter.handle_event(UiEvent::Crosshair(ev));
            }
            Event::Resize(width, height) => adapter.handle_event(UiEvent::Resize {
                width: f64::from(width),
                height: f64::from(height),
            }),
            _ => {}
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
