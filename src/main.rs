use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod engine;
mod game;

use engine::game_loop::FrameClock;
use engine::input::InputManager;
use engine::notify::ChannelNotifier;
use game::characters::stats::BASE_STATS;
use game::level::Level;

/// Player spawn point, a few tiles above the floor
const SPAWN: Vec2 = Vec2::new(160.0, 96.0);

/// Row of the floor strip and its width in tiles
const FLOOR_ROW: i32 = 12;
const FLOOR_COLUMNS: i32 = 40;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Frog Platformer...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Frog Platformer")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // The window title shows the level clock in whole seconds
    let (notifier, ticks) = ChannelNotifier::new();
    let mut shown_seconds: Option<u64> = None;

    let mut level = Level::new(SPAWN, BASE_STATS, Box::new(notifier))?;
    level.add_ground_strip(FLOOR_ROW, 0..FLOOR_COLUMNS);

    let mut input = InputManager::new();
    let mut clock = FrameClock::new();
    let mut failure: Option<anyhow::Error> = None;

    // Main event loop
    event_loop.run(|event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never reach us
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key_event, .. },
                ..
            } => {
                if key_event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                    && key_event.state == ElementState::Pressed
                    && !key_event.repeat
                {
                    clock.toggle_pause();
                }
                input.process_keyboard_event(&key_event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if let Some(frame) = clock.begin_frame() {
                    if let Err(e) = level.tick(frame.time_ms, frame.elapsed_ms, input.sample()) {
                        error!("Level tick failed: {}", e);
                        failure = Some(e.into());
                        elwt.exit();
                        return;
                    }
                }

                if let Some(time_ms) = ticks.try_iter().last() {
                    let seconds = (time_ms / 1000.0) as u64;
                    if shown_seconds != Some(seconds) {
                        shown_seconds = Some(seconds);
                        window.set_title(&format!("Frog Platformer - {}s", seconds));
                    }
                }
                input.end_frame();
                window.request_redraw();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    if let Some(e) = failure {
        return Err(e);
    }

    info!(
        "Shut down after {} frames ({:.0} fps)",
        clock.frame_count(),
        clock.fps()
    );
    Ok(())
}
