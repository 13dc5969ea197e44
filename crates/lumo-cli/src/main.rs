//! lumo CLI - render the built-in demo scene to an image file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use lumo::{
    deg2rad, object_color, pov_shader, Camera, ColorField, Light, PerspectiveCamera, Pigment,
    PixelBuffer, Point3, Scene, SharedPigment, TransformOp,
};

#[derive(Parser)]
#[command(name = "lumo")]
#[command(about = "Geometric ray tracer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo scene to an image (format from extension: .png, .ppm)
    Render {
        /// Image width in pixels
        #[arg(long, default_value_t = 960)]
        width: u32,
        /// Image height in pixels
        #[arg(long, default_value_t = 540)]
        height: u32,
        /// Horizontal field of view in degrees
        #[arg(long, default_value_t = 40.0)]
        fov: f64,
        /// Output file
        #[arg(short, long, default_value = "image.png")]
        output: PathBuf,
    },
    /// Render a turntable animation of the demo scene as numbered PNGs
    Animate {
        /// Number of frames over one full revolution
        #[arg(long, default_value_t = 36)]
        frames: u32,
        /// Image width in pixels
        #[arg(long, default_value_t = 480)]
        width: u32,
        /// Image height in pixels
        #[arg(long, default_value_t = 270)]
        height: u32,
        /// Output directory
        #[arg(short, long, default_value = "frames")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            width,
            height,
            fov,
            output,
        } => {
            let mut scene = demo_scene(width, height, fov);
            let mut image: PixelBuffer<u8> = PixelBuffer::new(width, height);
            scene.render(&mut image)?;
            write_image(&output, width, height, image.as_slice())?;
            println!("wrote {}", output.display());
        }
        Commands::Animate {
            frames,
            width,
            height,
            output,
        } => {
            if frames == 0 {
                bail!("frame count must be positive");
            }
            std::fs::create_dir_all(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            let mut scene = demo_scene(width, height, 40.0);
            let spin = scene.rotate_z(0.0);
            for frame in 0..frames {
                let angle = 360.0 * f64::from(frame) / f64::from(frames);
                spin.set(TransformOp::RotateZ(deg2rad(angle)));
                let mut image: PixelBuffer<u8> = PixelBuffer::new(width, height);
                scene.render(&mut image)?;
                let path = output.join(format!("frame_{frame:04}.png"));
                write_image(&path, width, height, image.as_slice())?;
            }
            println!("wrote {frames} frames to {}", output.display());
        }
    }

    Ok(())
}

fn constant(r: f64, g: f64, b: f64) -> SharedPigment {
    Pigment::new(ColorField::Constant(object_color(r, g, b, 0.0, 0.0))).into_shared()
}

/// Three spheres down the +x axis: a red unit sphere, a green squashed
/// one beside it, and a blue one above, lit from behind the camera's
/// left shoulder.
fn demo_scene(width: u32, height: u32, fov: f64) -> Scene {
    let mut scene = Scene::new();

    let red = scene.graph_mut().add_sphere();
    scene.graph_mut().translate(red, 5.0, 0.0, 0.0);
    scene.graph_mut().set_pigment(red, constant(1.0, 0.0, 0.0));
    scene.add_object(red);

    let green = scene.graph_mut().add_sphere();
    scene.graph_mut().scale(green, 0.5, 0.5, 1.0);
    scene.graph_mut().translate(green, 5.0, 2.0, 0.0);
    scene.graph_mut().set_pigment(green, constant(0.0, 1.0, 0.0));
    scene.add_object(green);

    let blue = scene.graph_mut().add_sphere();
    scene.graph_mut().translate(blue, 5.0, 0.0, 2.0);
    scene.graph_mut().set_pigment(blue, constant(0.0, 0.0, 1.0));
    scene.add_object(blue);

    scene.add_light(Light::white(Point3::new(-2.0, -5.0, 4.0)));

    let mut camera = PerspectiveCamera::with_fov(width, height, fov);
    camera
        .chain_mut()
        .location_lookat(Point3::new(-1.0, 0.0, 1.0), Point3::new(5.0, 0.5, 1.0));
    scene.set_camera(Box::new(camera));
    scene.set_shader(Box::new(pov_shader()));
    scene
}

fn write_image(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ppm") => write_ppm(path, width, height, rgb),
        Some("png") => {
            let buf = image::RgbImage::from_raw(width, height, rgb.to_vec())
                .context("pixel buffer size mismatch")?;
            buf.save(path)
                .with_context(|| format!("writing {}", path.display()))
        }
        _ => bail!("unsupported output format: {}", path.display()),
    }
}

/// Binary PPM (P6), the no-dependency format the demo originally used.
fn write_ppm(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<()> {
    use std::io::Write;
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    write!(out, "P6\n{width} {height}\n255\n")?;
    out.write_all(rgb)?;
    Ok(())
}
