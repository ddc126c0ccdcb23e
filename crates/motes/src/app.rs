use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use motes_config::Config;
use motes_core::{ColorTheme, InputEvent, Surface};
use motes_field::{Scene, SceneSettings, Tick};
use motes_render::{CellSize, TerminalSurface};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    scene: Scene,
    surface: TerminalSurface,
    /// Current color theme.
    color_theme: ColorTheme,
    /// Show the key help line.
    show_help: bool,
    /// Time to wait for input between frames.
    frame_interval: Duration,
    /// Origin of the scene clock.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] for a `cols` × `rows` terminal.
    pub fn new(config: &Config, seed: Option<u64>, cols: u16, rows: u16) -> Self {
        let display = &config.display;
        let mut surface = TerminalSurface::new(
            cols,
            rows,
            CellSize {
                width: display.cell_width,
                height: display.cell_height,
            },
        );
        let scene = Scene::new(scene_settings(config), &mut surface, seed);
        Self {
            running: false,
            scene,
            surface,
            color_theme: display.theme,
            show_help: display.show_help,
            frame_interval: Duration::from_millis(display.frame_interval_ms),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.scene.start();
        while self.running {
            self.tick(self.now_ms());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        log::info!(
            "exiting after {} ms with {} sprites",
            self.now_ms(),
            self.surface.len()
        );
        Ok(())
    }

    /// Advance the scene and the surface clock to `now_ms`.
    fn tick(&mut self, now_ms: u64) -> Tick {
        let tick = self.scene.advance(now_ms, &mut self.surface);
        if tick.emitted > 0 || tick.removed > 0 {
            log::trace!("tick at {now_ms}: {tick:?}");
        }
        self.surface.set_clock(now_ms);
        tick
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        self.surface.render(frame, self.color_theme);

        if !self.show_help {
            return;
        }
        let color = self.color_theme.color();
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let mut spans = vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            " pause  ".dark_gray(),
            "s".bold().fg(color),
            " spawner  ".dark_gray(),
            "t".bold().fg(color),
            " trail  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "h".bold().fg(color),
            " hide help".dark_gray(),
        ];
        if !self.scene.is_running() {
            spans.push("  paused".bold().fg(color));
        }
        frame.render_widget(Line::from(spans).centered(), chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.toggle_spawner(),
            (_, KeyCode::Char('t')) => self.toggle_trail(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Feed pointer movement to the scene in pixel space.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let at = self.surface.cell_to_pixel(mouse.column, mouse.row);
            self.scene
                .handle_event(&InputEvent::PointerMoved(at), &mut self.surface);
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        let viewport = self.surface.resize(cols, rows);
        log::debug!("resized to {cols}x{rows} cells");
        self.scene.handle_event(
            &InputEvent::Resized {
                width: viewport.width,
                height: viewport.height,
            },
            &mut self.surface,
        );
    }

    /// Pause or resume the particle field.
    fn toggle_pause(&mut self) {
        if self.scene.is_running() {
            self.scene.stop();
        } else {
            self.scene.start();
        }
    }

    fn toggle_spawner(&mut self) {
        if self.scene.is_spawner_running() {
            self.scene.stop_spawner();
        } else {
            self.scene.start_spawner();
        }
    }

    fn toggle_trail(&mut self) {
        let enabled = !self.scene.is_trail_enabled();
        self.scene.set_trail_enabled(enabled);
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn scene_settings(config: &Config) -> SceneSettings {
    SceneSettings {
        field: config.field.clone(),
        spawner: config.spawner.clone(),
        trail: config.trail.clone(),
        frame_interval_ms: config.display.frame_interval_ms,
    }
}
