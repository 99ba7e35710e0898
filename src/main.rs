// What you SEE now:
// • Your text drawn as a cloud of small dots that fly in from the center.
// • Move the mouse over the dots: they scatter and spring back.
// • Type to change the text (Backspace deletes). F1 text, F2 image, Tab next.
// • Ctrl+O opens an image; it is redrawn as colored dots. ESC quits.

mod drawer;

use drawer::{draw_text_5x7, Drawer};
use env_logger::Env;
use particle_sketch::{
    Color, Config, Error, FrameBuffer, ImageLoader, ImageSketch, RenderSession, Sketchbook, TextFont,
    TextSketch, Viewport,
};
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    /* --- Logging + settings ---
       Visual: nothing yet; RUST_LOG=debug shows sampling details in the terminal. */
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = Config::from_args(std::env::args())?;

    let font = match &config.font_path {
        Some(path) => TextFont::load(path)?,
        None => TextFont::Bitmap,
    };

    /* --- Window + session ---
       Visual: window opens on a dark background. */
    let mut drawer = Drawer::new(&config.title, config.width as usize, config.height as usize)?;
    let (w, h) = drawer.size();
    let mut session = RenderSession::new(Viewport::new(w as u32, h as u32), &config, font);
    let mut screen = FrameBuffer::new(w, h);
    let background = Color::from_u32(config.background);

    /* --- Sketches ---
       Visual: the text sketch starts right away. */
    let mut book = Sketchbook::new();
    book.register(Box::new(TextSketch::default()));
    book.register(Box::new(ImageSketch::default()));
    book.select("text", &mut session);

    /* --- Background image loading ---
       Visual: once a startup image is decoded the image sketch takes over. */
    let mut loader = ImageLoader::new();
    if let Some(path) = &config.image_path {
        loader.request(path.clone());
    }

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Follow the window size; a resize restarts the active sketch.
           Visual: dots regather at the new center. */
        let (w, h) = drawer.size();
        if w > 0 && h > 0 && session.resize(w as u32, h as u32) {
            book.reload(&mut session);
        }

        /* 2) Pointer */
        if let Some((mx, my)) = drawer.mouse_pos() {
            session.set_pointer(mx, my);
        }

        /* 3) Sketch selection */
        if drawer.text_pressed() {
            book.select("text", &mut session);
        }
        if drawer.image_pressed() {
            book.select("image", &mut session);
        }
        if drawer.cycle_pressed() {
            book.cycle(&mut session);
        }

        /* 4) Text input: any change re-initializes the text sketch. */
        let mut text_changed = false;
        for edit in drawer.text_edits() {
            text_changed |= session.edit_text(edit);
        }
        if text_changed {
            book.select("text", &mut session);
        }

        /* 5) Ctrl+O: pick a file; decoding happens off the frame loop. */
        if drawer.open_pressed() {
            let picked = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp"])
                .pick_file();
            if let Some(path) = picked {
                log::info!("loading {}", path.display());
                loader.request(path);
            }
        }

        /* 6) Finished loads */
        match loader.poll() {
            Some(Ok(image)) => {
                book.deliver_image(image, &mut session);
            }
            Some(Err(err @ Error::UnsupportedImage(_))) => {
                // Visual: a warning box; the current sketch keeps running
                log::warn!("{err}");
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Warning)
                    .set_title("Unsupported file")
                    .set_description(err.to_string())
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Some(Err(err)) => log::error!("image load failed: {err}"),
            None => {}
        }

        /* 7) Advance one frame: clear, draw every dot, push, jitter. */
        book.update(&mut session);

        /* 8) Composite over the background + HUD, then present. */
        session.canvas.present(background, &mut screen);
        let hud = format!(
            "{} | {} dots | F1 text  F2 image  TAB next  CTRL+O open | {}",
            book.active_name().unwrap_or("-").to_uppercase(),
            session.particle_count,
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        if loader.is_loading() {
            draw_text_5x7(&mut screen, 8, 20, "loading image...", 0x00_FF_CC_33);
        }
        drawer.present(&screen)?;

        /* 9) FPS counter (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::trace!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
