//! DriveReel - Google Drive movie browser
//! Lists video files from a shared Drive folder and plays them back over
//! whichever transport the file cooperates with.

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::process::Command;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

mod api;
mod catalog;
mod config;
mod models;
mod playback;
mod stream_player;

use api::{DriveClient, RawFileRecord};
use config::AppConfig;
use models::{MediaItem, Side, TransportKind};
use playback::{GestureResult, PlaybackSession, SeekCommand, SeekOrigin};
use stream_player::PlayerPane;

/// Case-insensitive substring check without allocation
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() { return true; }
    if needle.len() > haystack.len() { return false; }

    haystack.as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Get current local time as HH:MM:SS
fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Open a URL with the platform handler (Drive preview plays in the browser)
fn open_in_browser(url: &str) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();
    #[cfg(target_os = "macos")]
    let spawned = Command::new("open").arg(url).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let spawned = Command::new("xdg-open").arg(url).spawn();

    spawned
        .map(|_| ())
        .map_err(|e| format!("Could not open browser: {}", e))
}

/// Application icon: dark film frame with a play triangle
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Sprocket strips along top and bottom
            let in_strip = ny < 0.16 || ny > 0.84;
            let hole = in_strip && ((nx * 6.0).fract() > 0.25 && (nx * 6.0).fract() < 0.75)
                && (ny < 0.12 || ny > 0.88);

            // Play triangle in the frame
            let px = nx - 0.40;
            let py = ny - 0.50;
            let in_play = px >= 0.0 && px <= 0.24 && py.abs() <= (0.24 - px) * 0.7;

            let (r, g, b, a) = if hole {
                (0, 0, 0, 0)
            } else if in_strip {
                (24, 24, 32, 255)
            } else if in_play {
                (240, 200, 64, 255)
            } else {
                (38, 38, 52, 255)
            };

            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = a;
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Background task messages
enum TaskResult {
    CatalogLoaded {
        generation: u64,
        records: Vec<RawFileRecord>,
    },
    CatalogFailed {
        generation: u64,
        message: String,
    },
    DownloadFinished {
        name: String,
        result: Result<u64, String>,
    },
}

fn main() -> Result<(), eframe::Error> {
    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([760.0, 480.0])
            .with_icon(icon),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "DriveReel",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DriveReelApp::new()))
        }),
    )
}

struct DriveReelApp {
    // Settings
    config: AppConfig,
    folder_input: String,
    api_key_input: String,
    show_settings: bool,

    // Catalog state
    catalog: Vec<MediaItem>,
    loading: bool,
    error: Option<String>,
    fetch_generation: u64,
    fetched_once: bool,
    search_query: String,

    // Playback state
    session: Option<PlaybackSession>,
    transport_error: Option<String>,
    stream: PlayerPane,
    downloading: bool,
    fullscreen: bool,

    // Background task channel
    task_receiver: Receiver<TaskResult>,
    task_sender: Sender<TaskResult>,

    // Console log
    console_log: Vec<String>,
    show_console: bool,

    status_message: String,
}

impl Default for DriveReelApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveReelApp {
    fn new() -> Self {
        let config = AppConfig::load();
        let (task_sender, task_receiver) = channel();

        let mut app = Self {
            folder_input: config.folder_id.clone(),
            api_key_input: config.api_key.clone(),
            show_settings: config.folder_id.is_empty() || config.api_key.is_empty(),
            config,
            catalog: Vec::new(),
            loading: false,
            error: None,
            fetch_generation: 0,
            fetched_once: false,
            search_query: String::new(),
            session: None,
            transport_error: None,
            stream: PlayerPane::new(),
            downloading: false,
            fullscreen: false,
            task_receiver,
            task_sender,
            console_log: Vec::new(),
            show_console: false,
            status_message: String::new(),
        };

        if !app.config.folder_id.is_empty() && !app.config.api_key.is_empty() {
            app.refresh_catalog();
        }
        app
    }

    fn log(&mut self, message: &str) {
        let line = format!("[{}] {}", timestamp_now(), message);
        self.console_log.push(line);
        if self.console_log.len() > 500 {
            self.console_log.drain(0..100);
        }
    }

    /// Kick off a folder listing on a background thread. A newer request
    /// supersedes any in-flight one: results carry the generation they were
    /// issued under and stale ones are dropped on arrival.
    fn refresh_catalog(&mut self) {
        if self.config.folder_id.is_empty() || self.config.api_key.is_empty() {
            self.error = Some("Set the folder ID and API key first.".to_string());
            self.show_settings = true;
            return;
        }

        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.loading = true;
        self.error = None;
        self.log(&format!("[FETCH] Listing folder {} (request #{})", self.config.folder_id, generation));

        let client = DriveClient::new(&self.config.folder_id, &self.config.api_key);
        let sender = self.task_sender.clone();

        thread::spawn(move || {
            let result = client.fetch_folder_contents();
            let _ = match result {
                Ok(records) => sender.send(TaskResult::CatalogLoaded { generation, records }),
                Err(message) => sender.send(TaskResult::CatalogFailed { generation, message }),
            };
        });
    }

    /// Select an item from the grid: build the one live session on the
    /// initial transport and render it
    fn open_item(&mut self, item: MediaItem) {
        let name = item.name.clone();
        let session = PlaybackSession::new(item, self.config.preferred_transport);
        let transport = session.transport;
        self.session = Some(session);
        self.log(&format!("[PLAY] {} | Transport: {}", name, transport.label()));
        self.activate_transport();
    }

    /// Navigate back to the grid, dropping the session wholesale
    fn close_player(&mut self) {
        self.stream.stop();
        self.session = None;
        self.transport_error = None;
        self.downloading = false;
        self.log("[PLAY] Back to catalog");
    }

    /// Explicit user-requested transport switch. The session state resets
    /// its gesture window; the choice is recorded as the user preference.
    fn switch_transport(&mut self, requested: TransportKind) {
        let Some(session) = self.session.as_mut() else { return };
        let from = session.transport;
        session.switch_transport(requested);
        self.config.preferred_transport = requested;
        self.config.save();
        self.log(&format!("[PLAY] Transport switch: {} -> {}", from.label(), requested.label()));
        self.activate_transport();
    }

    /// Perform the rendering side effect of the session's current transport
    fn activate_transport(&mut self) {
        let Some(session) = self.session.as_ref() else { return };
        let transport = session.transport;
        let item = session.item.clone();
        self.transport_error = None;

        match transport {
            TransportKind::EmbeddedFrame => {
                self.stream.stop();
                let url = api::preview_url(&item.id);
                if let Err(e) = open_in_browser(&url) {
                    self.transport_error = Some(e.clone());
                    self.log(&format!("[ERROR] Preview unavailable: {}", e));
                }
            }
            TransportKind::DirectStream => {
                self.stream.play(&item.name, &api::content_url(&item.id));
            }
            TransportKind::FallbackDownload => {
                // Nothing to render; the download starts from the Save button
                self.stream.stop();
            }
        }
    }

    /// Pick a destination and stream the file to disk
    fn start_download(&mut self) {
        let Some(session) = self.session.as_ref() else { return };
        let item = session.item.clone();

        let Some(dest) = rfd::FileDialog::new()
            .set_file_name(&item.name)
            .save_file()
        else {
            return;
        };

        self.downloading = true;
        self.log(&format!("[SAVE] {} -> {}", item.name, dest.display()));

        let url = api::content_url(&item.id);
        let name = item.name.clone();
        let sender = self.task_sender.clone();
        thread::spawn(move || {
            let result = api::download_to_file(&url, &dest);
            let _ = sender.send(TaskResult::DownloadFinished { name, result });
        });
    }

    /// Feed one tap from the player surface through the gesture classifier
    fn on_tap(&mut self, side: Side) {
        let now = Instant::now();
        let Some(session) = self.session.as_mut() else { return };
        if let GestureResult::DoubleTap(side) = session.on_tap(side, now) {
            self.dispatch_seek(SeekOrigin::Gesture, side);
        }
    }

    /// Route a seek request from any origin into the dispatcher and apply
    /// the outcome to the stream player when one was produced
    fn dispatch_seek(&mut self, origin: SeekOrigin, side: Side) {
        let now = Instant::now();
        let playhead = self.stream.playhead();
        let Some(session) = self.session.as_mut() else { return };

        let command = SeekCommand { origin, side };
        let applied = session.dispatch(command, playhead, now);
        let transport = session.transport;

        if let Some(target) = applied {
            self.stream.seek_to(target);
            self.log(&format!("[SEEK] {:?} {:?} -> {:.1}s", origin, side, target));
        } else {
            self.log(&format!(
                "[SEEK] {:?} {:?} acknowledged ({} has no programmatic seek)",
                origin,
                side,
                transport.label()
            ));
        }
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        self.fullscreen = !self.fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
    }

    /// Keyboard seek bindings, active only while a session exists. With no
    /// session the keys fall through to normal widget handling.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.session.is_none() {
            return;
        }
        if ctx.wants_keyboard_input() {
            return;
        }
        let (left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::J),
                i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::L),
            )
        });
        if left {
            self.dispatch_seek(SeekOrigin::Key, Side::Left);
        }
        if right {
            self.dispatch_seek(SeekOrigin::Key, Side::Right);
        }
    }

    fn process_tasks(&mut self) {
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::CatalogLoaded { generation, records } => {
                    if generation != self.fetch_generation {
                        self.log(&format!("[FETCH] Discarding stale listing #{}", generation));
                        continue;
                    }
                    let total = records.len();
                    self.catalog = catalog::normalize(Some(records));
                    self.loading = false;
                    self.fetched_once = true;
                    self.error = None;
                    self.status_message =
                        format!("{} videos ({} files listed)", self.catalog.len(), total);
                    let line = format!("[FETCH] {} files, {} playable", total, self.catalog.len());
                    self.log(&line);
                }
                TaskResult::CatalogFailed { generation, message } => {
                    if generation != self.fetch_generation {
                        self.log(&format!("[FETCH] Discarding stale failure #{}", generation));
                        continue;
                    }
                    self.loading = false;
                    self.fetched_once = true;
                    self.log(&format!("[ERROR] {}", message));
                    self.error = Some(message);
                }
                TaskResult::DownloadFinished { name, result } => {
                    self.downloading = false;
                    match result {
                        Ok(bytes) => {
                            self.status_message = format!("Saved {}", name);
                            self.log(&format!("[SAVE] {} complete ({})", name, catalog::format_size(bytes)));
                        }
                        Err(e) => {
                            self.transport_error = Some(e.clone());
                            self.log(&format!("[ERROR] {}", e));
                        }
                    }
                }
            }
        }
    }
}

impl eframe::App for DriveReelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_tasks();
        self.handle_keys(ctx);

        // Decode errors surface as the transport-unavailable condition;
        // the session stays alive and the switch buttons stay offered
        if self.session.is_some() {
            if let Some(e) = self.stream.poll_error() {
                self.transport_error = Some(e.clone());
                self.log(&format!("[ERROR] Stream unavailable: {}", e));
            }
        }

        ctx.set_visuals(if self.config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.show_top_bar(ctx);
        self.show_console_panel(ctx);
        self.show_settings_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_some() {
                self.show_player_view(ctx, ui);
            } else if self.loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.spinner();
                    ui.label("Loading movies...");
                });
            } else if let Some(error) = self.error.clone() {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(255, 107, 107), &error);
                    ui.add_space(10.0);
                    if ui.button("↻ Retry").clicked() {
                        self.refresh_catalog();
                    }
                });
            } else if self.catalog.is_empty() {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    if self.fetched_once {
                        ui.label("No movies found.");
                    } else {
                        ui.label("Configure a shared folder to get started.");
                        ui.add_space(10.0);
                        if ui.button("⚙ Settings").clicked() {
                            self.show_settings = true;
                        }
                    }
                });
            } else {
                self.show_grid_view(ui);
            }
        });
    }
}

impl DriveReelApp {
    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.session.is_some() {
                    if ui.button("← Back").clicked() {
                        self.close_player();
                    }
                    if let Some(session) = self.session.as_ref() {
                        ui.label(egui::RichText::new(&session.item.name).strong());
                    }
                    if ui.button("⛶ Fullscreen").clicked() {
                        self.toggle_fullscreen(ctx);
                    }
                } else {
                    ui.label(egui::RichText::new("Movies").strong().size(16.0));
                    if ui.button("↻ Refresh").clicked() {
                        self.refresh_catalog();
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.search_query)
                            .hint_text("Search...")
                            .desired_width(180.0),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                    if ui.button("Console").clicked() {
                        self.show_console = !self.show_console;
                    }
                    ui.label(&self.status_message);
                });
            });
        });
    }

    fn show_console_panel(&mut self, ctx: &egui::Context) {
        if !self.show_console {
            return;
        }
        egui::TopBottomPanel::bottom("console")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.console_log {
                            ui.monospace(line);
                        }
                    });
            });
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        let mut apply = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Folder ID");
                    ui.add(egui::TextEdit::singleline(&mut self.folder_input).desired_width(280.0));
                    ui.end_row();

                    ui.label("API key");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.api_key_input)
                            .password(true)
                            .desired_width(280.0),
                    );
                    ui.end_row();

                    ui.label("Preferred transport");
                    egui::ComboBox::from_id_salt("pref_transport")
                        .selected_text(self.config.preferred_transport.label())
                        .show_ui(ui, |ui| {
                            for kind in TransportKind::ALL {
                                ui.selectable_value(
                                    &mut self.config.preferred_transport,
                                    kind,
                                    kind.label(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Dark mode");
                    ui.checkbox(&mut self.config.dark_mode, "");
                    ui.end_row();
                });

                ui.add_space(8.0);
                if ui.button("Save & Refresh").clicked() {
                    apply = true;
                }
            });

        if apply {
            self.config.folder_id = self.folder_input.trim().to_string();
            self.config.api_key = self.api_key_input.trim().to_string();
            self.config.save();
            self.show_settings = false;
            self.refresh_catalog();
        } else if !open {
            self.show_settings = false;
        }
    }

    fn show_grid_view(&mut self, ui: &mut egui::Ui) {
        let query = self.search_query.clone();
        let mut clicked: Option<MediaItem> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            let card_width = 150.0;
            let spacing = 12.0;
            let columns = ((ui.available_width() + spacing) / (card_width + spacing))
                .floor()
                .max(1.0) as usize;

            egui::Grid::new("movie_grid")
                .num_columns(columns)
                .spacing([spacing, spacing])
                .show(ui, |ui| {
                    let mut col = 0;
                    for item in &self.catalog {
                        if !query.is_empty() && !contains_ignore_case(&item.name, &query) {
                            continue;
                        }

                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(card_width, 110.0),
                            egui::Sense::click(),
                        );
                        if ui.is_rect_visible(rect) {
                            let painter = ui.painter();
                            let bg = if response.hovered() {
                                ui.visuals().widgets.hovered.bg_fill
                            } else {
                                ui.visuals().extreme_bg_color
                            };
                            painter.rect_filled(rect, 6.0, bg);
                            painter.text(
                                rect.center() - egui::vec2(0.0, 18.0),
                                egui::Align2::CENTER_CENTER,
                                "▶",
                                egui::FontId::proportional(28.0),
                                ui.visuals().strong_text_color(),
                            );
                            painter.text(
                                rect.center() + egui::vec2(0.0, 22.0),
                                egui::Align2::CENTER_CENTER,
                                &item.name,
                                egui::FontId::proportional(11.0),
                                ui.visuals().text_color(),
                            );
                            if let Some(size) = item.size_bytes {
                                painter.text(
                                    rect.center() + egui::vec2(0.0, 40.0),
                                    egui::Align2::CENTER_CENTER,
                                    catalog::format_size(size),
                                    egui::FontId::proportional(10.0),
                                    ui.visuals().weak_text_color(),
                                );
                            }
                        }
                        if response.clicked() {
                            clicked = Some(item.clone());
                        }

                        col += 1;
                        if col % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        if let Some(item) = clicked {
            self.open_item(item);
        }
    }

    fn show_player_view(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let Some(session) = self.session.as_ref() else { return };
        let transport = session.transport;
        let item = session.item.clone();

        // Transport switcher with an explicit affordance when the active
        // transport failed; no silent fallback happens here
        ui.horizontal(|ui| {
            ui.label("Transport:");
            for kind in TransportKind::ALL {
                let selected = kind == transport;
                if ui.selectable_label(selected, kind.label()).clicked() && !selected {
                    self.switch_transport(kind);
                }
            }
            if transport.seek_capable() {
                ui.weak("double-tap, ←/J, →/L or the buttons to skip 10s");
            } else {
                ui.weak("seek gestures acknowledged only on this transport");
            }
        });

        if let Some(error) = self.transport_error.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 179, 71),
                    format!("⚠ Transport unavailable: {}", error),
                );
                ui.weak("pick another transport above");
            });
        }

        ui.separator();

        // Re-read: switch_transport above may have rebuilt session state
        let Some(session) = self.session.as_ref() else { return };
        let transport = session.transport;

        let surface = match transport {
            TransportKind::DirectStream => self.stream.show(ctx, ui),
            TransportKind::EmbeddedFrame => {
                let rect = reserve_surface(ui);
                let painter = ui.painter();
                painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(12, 12, 16));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Playing in the Drive preview (system browser)",
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
                rect
            }
            TransportKind::FallbackDownload => {
                let rect = reserve_surface(ui);
                let painter = ui.painter();
                painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(12, 12, 16));
                let size_line = item
                    .size_bytes
                    .map(catalog::format_size)
                    .unwrap_or_else(|| "size unknown".to_string());
                painter.text(
                    rect.center() - egui::vec2(0.0, 14.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{} ({})", item.name, size_line),
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
                rect
            }
        };

        // Tap halves feed the classifier on every transport; whether a
        // classified gesture moves playback is the dispatcher's decision.
        // Registered before the overlay buttons so the buttons stay on top.
        let now = Instant::now();
        let mid_x = surface.center().x;
        let left_rect = egui::Rect::from_min_max(surface.min, egui::pos2(mid_x, surface.max.y));
        let right_rect = egui::Rect::from_min_max(egui::pos2(mid_x, surface.min.y), surface.max);

        let left_resp = ui.interact(left_rect, ui.id().with("tap_left"), egui::Sense::click());
        let right_resp = ui.interact(right_rect, ui.id().with("tap_right"), egui::Sense::click());
        if left_resp.clicked() {
            self.on_tap(Side::Left);
        }
        if right_resp.clicked() {
            self.on_tap(Side::Right);
        }

        // Per-transport action overlays, drawn over the tap surface
        match transport {
            TransportKind::EmbeddedFrame => {
                let mut overlay = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(surface.shrink(8.0))
                        .layout(egui::Layout::bottom_up(egui::Align::Center))
                        .id_salt("embedded_overlay"),
                );
                if overlay.button("↗ Reopen preview").clicked() {
                    self.activate_transport();
                }
            }
            TransportKind::FallbackDownload => {
                let mut overlay = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(surface.shrink(8.0))
                        .layout(egui::Layout::bottom_up(egui::Align::Center))
                        .id_salt("download_overlay"),
                );
                if self.downloading {
                    overlay.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Downloading...");
                    });
                } else if overlay.button("⬇ Save As...").clicked() {
                    self.start_download();
                }
            }
            TransportKind::DirectStream => {}
        }

        // Explicit skip buttons share the dispatcher with gestures and keys
        ui.horizontal(|ui| {
            if ui.button("⏪ 10s").clicked() {
                self.dispatch_seek(SeekOrigin::Button, Side::Left);
            }
            if ui.button("10s ⏩").clicked() {
                self.dispatch_seek(SeekOrigin::Button, Side::Right);
            }
        });

        // Seek indicator: visible for the current token's lifetime only.
        // Replacing the token moves the deadline, so an older timer can
        // never hide a newer indicator.
        if let Some(session) = self.session.as_mut() {
            session.clear_expired_feedback(now);
            if let Some(token) = session.active_feedback(now) {
                let (pos, text) = match token.side {
                    Side::Left => (
                        egui::pos2(surface.left() + surface.width() * 0.18, surface.center().y),
                        "⏪ 10s",
                    ),
                    Side::Right => (
                        egui::pos2(surface.right() - surface.width() * 0.18, surface.center().y),
                        "10s ⏩",
                    ),
                };
                let painter = ui.painter();
                painter.circle_filled(pos, 34.0, egui::Color32::from_black_alpha(140));
                painter.text(
                    pos,
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(16.0),
                    egui::Color32::WHITE,
                );
                ctx.request_repaint_after(token.expires_at - now);
            }
        }
    }
}

/// Reserve the video-sized area used by the non-streaming transports
fn reserve_surface(ui: &mut egui::Ui) -> egui::Rect {
    let available = ui.available_size();
    let height = (available.y - 40.0).max(120.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(available.x, height), egui::Sense::hover());
    rect
}
