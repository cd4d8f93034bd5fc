use fourier_viz::core::{normalize_to_u8, GrayImage, WORKING_SIZE};
use fourier_viz::spectrum::Spectrum;
use fourier_viz::{dispatch, Action, Request};

const N: usize = WORKING_SIZE;

fn flat_gray() -> GrayImage {
    GrayImage::filled(N, N, 128).expect("flat image")
}

fn checkerboard() -> GrayImage {
    GrayImage::from_fn(N, N, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 }).expect("checkerboard")
}

fn disk() -> GrayImage {
    GrayImage::from_fn(N, N, |x, y| {
        let dx = x as f64 - 100.0;
        let dy = y as f64 - 140.0;
        if dx * dx + dy * dy < 60.0 * 60.0 {
            210
        } else {
            35
        }
    })
    .expect("disk")
}

#[test]
fn flat_gray_has_a_single_dc_bin() {
    let img = flat_gray();
    let spectrum = Spectrum::compute(&img.view()).expect("spectrum");
    let (cr, cc) = spectrum.dc_index();
    assert_eq!((cr, cc), (N / 2, N / 2));

    let dc = spectrum.get(cr, cc);
    assert!((dc.re - 128.0 * (N * N) as f64).abs() < 1e-3);

    let magnitude = spectrum.magnitude();
    let phase = spectrum.phase();
    for r in 0..N {
        for c in 0..N {
            if (r, c) == (cr, cc) {
                continue;
            }
            assert!(spectrum.get(r, c).norm() < 1e-4, "bin ({r},{c})");
            assert!(magnitude.get(c, r) < 1e-4, "log bin ({r},{c})");
        }
    }
    assert!(phase.get(cc, cr).abs() < 1e-12);
    let nonzero_phase = phase.data.iter().filter(|&&p| p != 0.0).count();
    assert_eq!(nonzero_phase, 0);

    let rendered = dispatch(&Request::new(Action::Phase, Some(img.clone()))).expect("phase");
    let shown_phase = &rendered.columns[0].as_ref().expect("phase panel").image;
    assert_eq!(shown_phase.min_max(), (0, 0));

    let shown = normalize_to_u8(&magnitude);
    assert_eq!(shown.get(cc, cr), 255);
    assert_eq!(shown.data.iter().filter(|&&v| v > 0).count(), 1);
}

#[test]
fn checkerboard_energy_sits_farthest_from_center() {
    let img = checkerboard();
    let spectrum = Spectrum::compute(&img.view()).expect("spectrum");
    let (cr, cc) = spectrum.dc_index();

    // Strongest bin other than DC.
    let mut best = (0.0f64, (usize::MAX, usize::MAX));
    for r in 0..N {
        for c in 0..N {
            if (r, c) == (cr, cc) {
                continue;
            }
            let m = spectrum.get(r, c).norm();
            if m > best.0 {
                best = (m, (r, c));
            }
        }
    }
    assert_eq!(best.1, (0, 0));
    // Nyquist bin carries as much energy as the mean.
    let dc = spectrum.get(cr, cc).norm();
    assert!((best.0 - dc).abs() < 1e-6 * dc);

    // Every other bin is empty.
    let energy_elsewhere: f64 = (0..N)
        .flat_map(|r| (0..N).map(move |c| (r, c)))
        .filter(|&rc| rc != (cr, cc) && rc != (0, 0))
        .map(|(r, c)| spectrum.get(r, c).norm())
        .fold(0.0, f64::max);
    assert!(energy_elsewhere < 1e-4);
}

#[test]
fn displayed_spectra_use_full_range() {
    let img = disk();
    for action in [Action::Magnitude, Action::Phase] {
        let rendered = dispatch(&Request::new(action, Some(img.clone()))).expect("dispatch");
        let panel = rendered.panels().next().expect("panel");
        assert_eq!(panel.image.min_max(), (0, 255), "{action}");
        assert_eq!((panel.image.width, panel.image.height), (N, N));
    }
}

#[test]
fn magnitude_spectrum_is_point_symmetric() {
    let img = disk();
    let magnitude = Spectrum::compute(&img.view())
        .expect("spectrum")
        .magnitude();
    for r in 1..N {
        for c in 1..N {
            let a = magnitude.get(c, r);
            let b = magnitude.get(N - c, N - r);
            assert!((a - b).abs() < 1e-6, "({r},{c}): {a} vs {b}");
        }
    }
}

#[test]
fn jagging_demo_yields_blocks_and_spectrum() {
    let rendered = dispatch(&Request::new(Action::Jagging, Some(disk()))).expect("dispatch");
    let [Some(jagged), Some(spectrum)] = &rendered.columns else {
        panic!("jagging should fill both columns");
    };
    assert_eq!(jagged.caption, "Jagged Image");
    assert_eq!(spectrum.caption, "Magnitude Spectrum (Jagging)");

    let img = &jagged.image;
    assert_eq!((img.width, img.height), (N, N));
    for by in (0..N).step_by(8) {
        for bx in (0..N).step_by(8) {
            let v = img.get(bx, by);
            for y in by..by + 8 {
                for x in bx..bx + 8 {
                    assert_eq!(img.get(x, y), v, "block ({bx},{by}) pixel ({x},{y})");
                }
            }
        }
    }
    assert_eq!(spectrum.image.min_max(), (0, 255));
}

#[test]
fn grating_rows_are_identical() {
    let rendered = dispatch(&Request::new(Action::Grating, None)).expect("dispatch");
    let panel = rendered.panels().next().expect("panel");
    let first = panel.image.row(0);
    for y in 0..panel.image.height {
        assert_eq!(panel.image.row(y), first);
    }
}

#[test]
fn dispatch_ignores_image_for_grating() {
    let with = dispatch(&Request::new(Action::Grating, Some(disk()))).expect("dispatch");
    let without = dispatch(&Request::new(Action::Grating, None)).expect("dispatch");
    assert_eq!(
        with.panels().next().map(|p| &p.image),
        without.panels().next().map(|p| &p.image)
    );
}
