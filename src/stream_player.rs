// In-process stream player using ffmpeg-next
// Requires FFmpeg libraries: libavcodec, libavformat, libavutil, libswscale
//
// To install FFmpeg development libraries:
// - Ubuntu/Debian: sudo apt install libavcodec-dev libavformat-dev libavutil-dev libswscale-dev libavdevice-dev
// - Fedora: sudo dnf install ffmpeg-devel
// - macOS: brew install ffmpeg
// - Windows: Download from https://ffmpeg.org and set FFMPEG_DIR environment variable

use crate::playback::Playhead;

#[cfg(feature = "internal-player")]
mod player_impl {
    use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::playback::Playhead;

    extern crate ffmpeg_next as ffmpeg;
    use ffmpeg::format::Pixel;
    use ffmpeg::media::Type;
    use ffmpeg::software::scaling::{context::Context as ScalingContext, flag::Flags};
    use ffmpeg::util::frame::video::Video as VideoFrame;

    /// Player state
    #[derive(Debug, Clone, PartialEq)]
    pub enum PlayerState {
        Stopped,
        Loading,
        Playing,
        Paused,
        Error(String),
    }

    /// Decoded video frame for rendering
    pub struct DecodedFrame {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>, // RGB24 data
        pub pts: i64,
    }

    /// Commands to send to player thread
    enum PlayerCommand {
        Stop,
        Pause,
        Resume,
        Seek(f64),
    }

    /// Messages from player thread
    pub enum PlayerMessage {
        StateChanged(PlayerState),
        Error(String),
        Finished,
    }

    #[derive(Debug, Clone, Copy, Default)]
    struct StreamProgress {
        position: f64,
        duration: f64,
    }

    /// Seekable stream player decoding on a background thread
    pub struct StreamPlayer {
        state: Arc<Mutex<PlayerState>>,
        command_sender: Option<Sender<PlayerCommand>>,
        message_receiver: Option<Receiver<PlayerMessage>>,
        current_frame: Arc<Mutex<Option<DecodedFrame>>>,
        progress: Arc<Mutex<StreamProgress>>,
        url: String,
        item_name: String,
    }

    impl StreamPlayer {
        pub fn new() -> Self {
            ffmpeg::init().ok();

            Self {
                state: Arc::new(Mutex::new(PlayerState::Stopped)),
                command_sender: None,
                message_receiver: None,
                current_frame: Arc::new(Mutex::new(None)),
                progress: Arc::new(Mutex::new(StreamProgress::default())),
                url: String::new(),
                item_name: String::new(),
            }
        }

        /// Get current player state
        pub fn state(&self) -> PlayerState {
            self.state.lock().unwrap().clone()
        }

        /// Get the latest decoded frame
        pub fn take_frame(&self) -> Option<DecodedFrame> {
            self.current_frame.lock().unwrap().take()
        }

        /// Position and duration, once the container reported a duration
        pub fn playhead(&self) -> Option<Playhead> {
            if !matches!(self.state(), PlayerState::Playing | PlayerState::Paused) {
                return None;
            }
            let progress = *self.progress.lock().unwrap();
            if progress.duration > 0.0 {
                Some(Playhead {
                    position: progress.position,
                    duration: progress.duration,
                })
            } else {
                None
            }
        }

        /// Check for messages from player thread
        pub fn poll_messages(&mut self) -> Vec<PlayerMessage> {
            let mut messages = Vec::new();
            if let Some(ref receiver) = self.message_receiver {
                loop {
                    match receiver.try_recv() {
                        Ok(msg) => messages.push(msg),
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            self.message_receiver = None;
                            break;
                        }
                    }
                }
            }
            messages
        }

        /// Play a stream URL
        pub fn play(&mut self, name: &str, url: &str) {
            self.stop();
            self.url = url.to_string();
            self.item_name = name.to_string();

            *self.state.lock().unwrap() = PlayerState::Loading;
            *self.progress.lock().unwrap() = StreamProgress::default();

            let (cmd_tx, cmd_rx) = channel();
            let (msg_tx, msg_rx) = channel();

            self.command_sender = Some(cmd_tx);
            self.message_receiver = Some(msg_rx);

            let url = url.to_string();
            let state = Arc::clone(&self.state);
            let current_frame = Arc::clone(&self.current_frame);
            let progress = Arc::clone(&self.progress);

            thread::spawn(move || {
                Self::decode_thread(url, state, current_frame, progress, cmd_rx, msg_tx);
            });
        }

        fn decode_thread(
            url: String,
            state: Arc<Mutex<PlayerState>>,
            current_frame: Arc<Mutex<Option<DecodedFrame>>>,
            progress: Arc<Mutex<StreamProgress>>,
            cmd_rx: Receiver<PlayerCommand>,
            msg_tx: Sender<PlayerMessage>,
        ) {
            // Options for byte-range playback over HTTP
            let mut options = ffmpeg::Dictionary::new();
            options.set("reconnect", "1");
            options.set("reconnect_streamed", "1");
            options.set("reconnect_delay_max", "5");
            options.set("timeout", "5000000"); // 5 second timeout

            // Open input
            let mut ictx = match ffmpeg::format::input_with_dictionary(&url, options) {
                Ok(ctx) => ctx,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PlayerMessage::Error(format!("Failed to open stream: {}", e)));
                    return;
                }
            };

            // Find video stream
            let video_stream_index = match ictx.streams().best(Type::Video) {
                Some(stream) => stream.index(),
                None => {
                    *state.lock().unwrap() = PlayerState::Error("No video stream found".to_string());
                    let _ = msg_tx.send(PlayerMessage::Error("No video stream found".to_string()));
                    return;
                }
            };

            let video_stream = ictx.stream(video_stream_index).unwrap();
            let time_base = f64::from(video_stream.time_base());
            let context_decoder = match ffmpeg::codec::context::Context::from_parameters(video_stream.parameters()) {
                Ok(c) => c,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PlayerMessage::Error(format!("Failed to read stream parameters: {}", e)));
                    return;
                }
            };

            let mut decoder = match context_decoder.decoder().video() {
                Ok(d) => d,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PlayerMessage::Error(format!("Failed to create decoder: {}", e)));
                    return;
                }
            };

            // Container duration in seconds, if the container knows it
            let av_time_base = f64::from(ffmpeg::ffi::AV_TIME_BASE);
            let duration_secs = if ictx.duration() > 0 {
                ictx.duration() as f64 / av_time_base
            } else {
                0.0
            };
            progress.lock().unwrap().duration = duration_secs;

            // Get video dimensions
            let width = decoder.width();
            let height = decoder.height();

            // Scale to reasonable size if too large
            let (target_width, target_height) = if width > 1280 || height > 720 {
                let scale = f64::min(1280.0 / width as f64, 720.0 / height as f64);
                ((width as f64 * scale) as u32, (height as f64 * scale) as u32)
            } else {
                (width, height)
            };

            // Create scaler to convert to RGB24
            let mut scaler = match ScalingContext::get(
                decoder.format(),
                width,
                height,
                Pixel::RGB24,
                target_width,
                target_height,
                Flags::BILINEAR,
            ) {
                Ok(s) => s,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PlayerMessage::Error(format!("Failed to create scaler: {}", e)));
                    return;
                }
            };

            *state.lock().unwrap() = PlayerState::Playing;
            let _ = msg_tx.send(PlayerMessage::StateChanged(PlayerState::Playing));

            let mut paused = false;
            let frame_duration = Duration::from_secs_f64(1.0 / 30.0); // Target 30fps display
            let mut last_frame_time = Instant::now();

            // Packet processing loop; a manual loop so seek commands can
            // run against the format context between reads
            loop {
                // Drain commands
                let mut stop = false;
                loop {
                    match cmd_rx.try_recv() {
                        Ok(PlayerCommand::Stop) => {
                            stop = true;
                            break;
                        }
                        Ok(PlayerCommand::Pause) => {
                            paused = true;
                            *state.lock().unwrap() = PlayerState::Paused;
                            let _ = msg_tx.send(PlayerMessage::StateChanged(PlayerState::Paused));
                        }
                        Ok(PlayerCommand::Resume) => {
                            paused = false;
                            *state.lock().unwrap() = PlayerState::Playing;
                            let _ = msg_tx.send(PlayerMessage::StateChanged(PlayerState::Playing));
                        }
                        Ok(PlayerCommand::Seek(target)) => {
                            let ts = (target * av_time_base) as i64;
                            match ictx.seek(ts, ..ts) {
                                Ok(()) => {
                                    decoder.flush();
                                    progress.lock().unwrap().position = target;
                                }
                                Err(e) => {
                                    let _ = msg_tx.send(PlayerMessage::Error(format!("Seek failed: {}", e)));
                                }
                            }
                        }
                        Err(_) => break,
                    }
                }
                if stop {
                    break;
                }

                if paused {
                    thread::sleep(Duration::from_millis(50));
                    continue;
                }

                // Read the next packet; EOF ends playback
                let (stream_index, packet) = match ictx.packets().next() {
                    Some((stream, packet)) => (stream.index(), packet),
                    None => break,
                };

                // Only process video packets
                if stream_index != video_stream_index {
                    continue;
                }

                // Decode packet
                if decoder.send_packet(&packet).is_err() {
                    continue;
                }

                let mut decoded = VideoFrame::empty();
                while decoder.receive_frame(&mut decoded).is_ok() {
                    // Scale to RGB24
                    let mut rgb_frame = VideoFrame::empty();
                    if scaler.run(&decoded, &mut rgb_frame).is_ok() {
                        // Extract RGB data
                        let data = rgb_frame.data(0);
                        let stride = rgb_frame.stride(0);

                        // Copy frame data (handling stride)
                        let mut frame_data = Vec::with_capacity((target_width * target_height * 3) as usize);
                        for y in 0..target_height as usize {
                            let row_start = y * stride;
                            let row_end = row_start + (target_width as usize * 3);
                            frame_data.extend_from_slice(&data[row_start..row_end]);
                        }

                        let pts = decoded.pts().unwrap_or(0);
                        let frame = DecodedFrame {
                            width: target_width,
                            height: target_height,
                            data: frame_data,
                            pts,
                        };

                        // Store frame and advance the playhead
                        *current_frame.lock().unwrap() = Some(frame);
                        progress.lock().unwrap().position = pts as f64 * time_base;

                        // Rate limiting to avoid overwhelming the UI
                        let elapsed = last_frame_time.elapsed();
                        if elapsed < frame_duration {
                            thread::sleep(frame_duration - elapsed);
                        }
                        last_frame_time = Instant::now();
                    }
                }
            }

            *state.lock().unwrap() = PlayerState::Stopped;
            let _ = msg_tx.send(PlayerMessage::Finished);
        }

        /// Stop playback
        pub fn stop(&mut self) {
            if let Some(ref sender) = self.command_sender {
                let _ = sender.send(PlayerCommand::Stop);
            }
            self.command_sender = None;
            self.message_receiver = None;
            *self.state.lock().unwrap() = PlayerState::Stopped;
            *self.current_frame.lock().unwrap() = None;
            *self.progress.lock().unwrap() = StreamProgress::default();
        }

        /// Toggle pause
        pub fn toggle_pause(&mut self) {
            if let Some(ref sender) = self.command_sender {
                let state = self.state.lock().unwrap().clone();
                match state {
                    PlayerState::Playing => {
                        let _ = sender.send(PlayerCommand::Pause);
                    }
                    PlayerState::Paused => {
                        let _ = sender.send(PlayerCommand::Resume);
                    }
                    _ => {}
                }
            }
        }

        /// Seek to an absolute position in seconds
        pub fn seek_to(&mut self, position: f64) {
            if let Some(ref sender) = self.command_sender {
                let _ = sender.send(PlayerCommand::Seek(position.max(0.0)));
            }
        }

        /// Get current URL
        pub fn current_url(&self) -> &str {
            &self.url
        }

        /// Get item name
        pub fn item_name(&self) -> &str {
            &self.item_name
        }
    }

    impl Drop for StreamPlayer {
        fn drop(&mut self) {
            self.stop();
        }
    }
}

// Stub implementation when internal-player feature is disabled
#[cfg(not(feature = "internal-player"))]
mod player_impl {
    use crate::playback::Playhead;

    #[derive(Debug, Clone, PartialEq)]
    pub enum PlayerState {
        Stopped,
        Loading,
        Playing,
        Paused,
        Error(String),
    }

    pub struct DecodedFrame {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
        pub pts: i64,
    }

    pub enum PlayerMessage {
        StateChanged(PlayerState),
        Error(String),
        Finished,
    }

    pub struct StreamPlayer {
        state: PlayerState,
        item_name: String,
    }

    impl StreamPlayer {
        pub fn new() -> Self {
            Self {
                state: PlayerState::Stopped,
                item_name: String::new(),
            }
        }

        pub fn state(&self) -> PlayerState {
            self.state.clone()
        }

        pub fn take_frame(&self) -> Option<DecodedFrame> {
            None
        }

        pub fn playhead(&self) -> Option<Playhead> {
            None
        }

        pub fn poll_messages(&mut self) -> Vec<PlayerMessage> {
            Vec::new()
        }

        pub fn play(&mut self, name: &str, _url: &str) {
            self.item_name = name.to_string();
            self.state = PlayerState::Error("Internal player not enabled. Build with --features internal-player".to_string());
        }

        pub fn stop(&mut self) {
            self.state = PlayerState::Stopped;
        }

        pub fn toggle_pause(&mut self) {}
        pub fn seek_to(&mut self, _position: f64) {}
        pub fn current_url(&self) -> &str { "" }
        pub fn item_name(&self) -> &str { &self.item_name }
    }
}

// Re-export
pub use player_impl::*;

/// Stream surface that can be embedded in egui
pub struct PlayerPane {
    pub player: StreamPlayer,
    pub texture: Option<egui::TextureHandle>,
    last_error: Option<String>,
}

impl PlayerPane {
    pub fn new() -> Self {
        Self {
            player: StreamPlayer::new(),
            texture: None,
            last_error: None,
        }
    }

    /// Start streaming an item
    pub fn play(&mut self, name: &str, url: &str) {
        self.last_error = None;
        self.texture = None;
        self.player.play(name, url);
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.player.stop();
        self.texture = None;
    }

    pub fn playhead(&self) -> Option<Playhead> {
        self.player.playhead()
    }

    pub fn seek_to(&mut self, position: f64) {
        self.player.seek_to(position);
    }

    /// Errors reported by the decode thread since playback started.
    /// Drains the message channel; call once per frame.
    pub fn poll_error(&mut self) -> Option<String> {
        let mut fresh = None;
        for msg in self.player.poll_messages() {
            if let PlayerMessage::Error(e) = msg {
                fresh = Some(e.clone());
                self.last_error = Some(e);
            }
        }
        fresh
    }

    /// Render the stream surface and its transport controls, returning the
    /// rectangle the video occupies (the gesture surface)
    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) -> egui::Rect {
        // Check for new frames
        if let Some(frame) = self.player.take_frame() {
            let image = egui::ColorImage::from_rgb(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );

            self.texture = Some(ctx.load_texture(
                "video_frame",
                image,
                egui::TextureOptions::LINEAR,
            ));
        }

        // Default surface leaves room for the control strip below so tap
        // zones laid over it cannot cover the buttons
        let mut video_rect = ui.available_rect_before_wrap();
        video_rect.set_height((video_rect.height() - 48.0).max(80.0));

        ui.vertical_centered(|ui| {
            // Render video or status
            if let Some(ref texture) = self.texture {
                let available = ui.available_size();
                let tex_size = texture.size_vec2();
                let aspect = tex_size.x / tex_size.y;

                let (width, height) = if available.x / available.y > aspect {
                    (available.y * aspect * 0.9, available.y * 0.9)
                } else {
                    (available.x * 0.9, available.x / aspect * 0.9)
                };

                let response = ui.image((texture.id(), egui::vec2(width, height)));
                video_rect = response.rect;
            } else {
                ui.add_space(50.0);

                match self.player.state() {
                    PlayerState::Loading => {
                        ui.spinner();
                        ui.label("Connecting to stream...");
                    }
                    PlayerState::Stopped => {
                        ui.label("Playback stopped");
                        if let Some(ref error) = self.last_error {
                            ui.add_space(10.0);
                            ui.colored_label(egui::Color32::RED, format!("Error: {}", error));
                        }
                    }
                    PlayerState::Error(ref e) => {
                        ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                    }
                    _ => {}
                }
            }

            // Show any errors even while playing
            if matches!(self.player.state(), PlayerState::Playing) {
                if let Some(ref error) = self.last_error {
                    ui.add_space(5.0);
                    ui.colored_label(egui::Color32::YELLOW, format!("⚠ {}", error));
                }
            }
        });

        // Transport strip: position readout and pause control
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(self.player.item_name());

            if let Some(playhead) = self.playhead() {
                ui.label(format!(
                    "{} / {}",
                    format_clock(playhead.position),
                    format_clock(playhead.duration)
                ));
                let fraction = (playhead.position / playhead.duration).clamp(0.0, 1.0) as f32;
                ui.add(egui::ProgressBar::new(fraction).desired_width(200.0));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⏹ Stop").clicked() {
                    self.stop();
                }

                let pause_text = if matches!(self.player.state(), PlayerState::Paused) {
                    "▶ Play"
                } else {
                    "⏸ Pause"
                };
                if ui.button(pause_text).clicked() {
                    self.player.toggle_pause();
                }
            });
        });

        // Request continuous repaint while playing
        if matches!(self.player.state(), PlayerState::Playing | PlayerState::Loading) {
            ctx.request_repaint();
        }

        video_rect
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self.player.state(), PlayerState::Playing | PlayerState::Loading)
    }
}

fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
