use fourier_viz::load::{load_working_image, save_png};
use fourier_viz::render::compose_layout;
use fourier_viz::{dispatch, Action, DisplayParams, Request};

#[cfg(feature = "tracing")]
use fourier_viz::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false, None);
    #[cfg(not(feature = "tracing"))]
    fourier_viz::core::init_with_level(log::LevelFilter::Info)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: visualize <image_path>");
        return Ok(());
    };

    let img = load_working_image(path)?;
    let params = DisplayParams::default();
    for action in Action::ALL {
        let rendered = dispatch(&Request::new(action, Some(img.clone())))?;
        let out = format!("{}.png", action.name());
        save_png(&compose_layout(&rendered, &params)?, &out)?;
        println!("{action}: {out}");
    }

    Ok(())
}
