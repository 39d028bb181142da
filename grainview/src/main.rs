mod app;
mod forms;
mod modal;
mod samples;
mod upload;

use std::fs::File;
use std::time::Duration;

use sandtable::{process_events, Event, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;

fn main() {
    let log_file = File::create("grainview.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run() {
        eprintln!("Error: {e}");
    }
}

fn run() -> std::io::Result<()> {
    let mut app = App::new();
    let dispatcher = app::setup(&app);
    let mut term = Terminal::new()?;

    while !app.should_quit() {
        let screen = app.view();
        term.draw(screen.lines())?;

        let raw = term.poll(Some(Duration::from_millis(100)))?;
        let events = process_events(&raw, app.root(), screen.layout());
        for event in events {
            match &event {
                Event::Key { key, modifiers } => app.on_key(*key, *modifiers),
                Event::Click { .. } => {
                    dispatcher.dispatch(&mut app, &event);
                }
                Event::Resize { .. } => {}
            }
        }
    }

    Ok(())
}
