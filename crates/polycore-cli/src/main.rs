//! polycore CLI - render primitives to SVG and inspect their measurements.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polycore::{
    cuboid, dodecahedron, extrusion, octahedron, BoundingVolume, Contour2D, Point2, Shape,
    SvgConfig, Vertex,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polycore")]
#[command(about = "Render and measure polygonal primitives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a primitive into an SVG file
    Render {
        /// Primitive to build
        shape: ShapeKind,
        /// Uniform scale applied to the primitive
        #[arg(short, long, default_value_t = 20.0)]
        scale: f64,
        /// Output SVG file
        #[arg(short, long, default_value = "shape.svg")]
        output: PathBuf,
        /// TOML file with canvas, styles and views
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Draw axis arrows of the given length (30 when no value is given)
        #[arg(long, num_args = 0..=1, default_missing_value = "30")]
        axis: Option<f64>,
        /// Rotation about the world x axis, in degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotate_x: f64,
        /// Rotation about the world y axis, in degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotate_y: f64,
        /// Rotation about the world z axis, in degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotate_z: f64,
    },
    /// Print vertex/face counts, area, volume and bounds of a primitive
    Info {
        /// Primitive to build
        shape: ShapeKind,
        /// Uniform scale applied to the primitive
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeKind {
    /// Cube spanning -1..1 on every axis
    #[value(alias = "box")]
    Cube,
    /// Regular octahedron of radius 1
    Octahedron,
    /// Regular dodecahedron of radius 1
    Dodecahedron,
    /// Unit square extruded to height 1
    Prism,
    /// 32-sided circle of radius 1 extruded to height 2
    Cylinder,
}

impl ShapeKind {
    fn build(self) -> Result<Shape> {
        let shape = match self {
            ShapeKind::Cube => cuboid(Vertex::new(-1.0, -1.0, -1.0), Vertex::new(1.0, 1.0, 1.0)),
            ShapeKind::Octahedron => octahedron(Vertex::zeros(), 1.0),
            ShapeKind::Dodecahedron => dodecahedron(Vertex::zeros(), 1.0),
            ShapeKind::Prism => {
                let square = Contour2D::square(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
                extrusion(&square, 1.0)?
            }
            ShapeKind::Cylinder => {
                let circle = Contour2D::circle(Point2::origin(), 1.0, 32);
                extrusion(&circle, 2.0)?
            }
        };
        Ok(shape)
    }

    fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Dodecahedron => "dodecahedron",
            ShapeKind::Prism => "prism",
            ShapeKind::Cylinder => "cylinder",
        }
    }
}

/// Measurements printed by `info`.
#[derive(Serialize)]
struct ShapeInfo {
    shape: &'static str,
    vertices: usize,
    faces: usize,
    closed: bool,
    surface_area: f64,
    volume: f64,
    bounding_volume: BoundsInfo,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum BoundsInfo {
    Empty,
    Box { min: [f64; 3], max: [f64; 3] },
    Sphere { center: [f64; 3], radius: f64 },
}

impl From<&BoundingVolume> for BoundsInfo {
    fn from(bv: &BoundingVolume) -> Self {
        match bv {
            BoundingVolume::Empty => BoundsInfo::Empty,
            BoundingVolume::Box { min, max } => BoundsInfo::Box {
                min: [min.x, min.y, min.z],
                max: [max.x, max.y, max.z],
            },
            BoundingVolume::Sphere { center, radius } => BoundsInfo::Sphere {
                center: [center.x, center.y, center.z],
                radius: *radius,
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            shape,
            scale,
            output,
            config,
            axis,
            rotate_x,
            rotate_y,
            rotate_z,
        } => {
            let rotation = [rotate_x, rotate_y, rotate_z];
            render(shape, scale, &output, config, axis, rotation)?;
        }
        Commands::Info { shape, scale, json } => {
            show_info(shape, scale, json)?;
        }
    }

    Ok(())
}

fn render(
    kind: ShapeKind,
    scale: f64,
    output: &Path,
    config: Option<PathBuf>,
    axis: Option<f64>,
    rotation_deg: [f64; 3],
) -> Result<()> {
    let config = match config {
        Some(path) => SvgConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SvgConfig::default(),
    };

    let mut shape = kind.build()?;
    shape.scale(scale);
    for (axis_dir, degrees) in [Vertex::x(), Vertex::y(), Vertex::z()]
        .into_iter()
        .zip(rotation_deg)
    {
        if degrees != 0.0 {
            shape.rotate(axis_dir, degrees.to_radians());
        }
    }

    let doc = config.render(&shape, axis);
    doc.write_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        shape = kind.name(),
        path = %output.display(),
        objects = doc.render_objects().len(),
        styles = doc.styles().len(),
        "Wrote SVG"
    );
    Ok(())
}

fn show_info(kind: ShapeKind, scale: f64, json: bool) -> Result<()> {
    let mut shape = kind.build()?;
    shape.scale(scale);

    let report = ShapeInfo {
        shape: kind.name(),
        vertices: shape.vertex_count(),
        faces: shape.face_count(),
        closed: shape.is_closed(),
        surface_area: shape.surface_area(),
        volume: shape.volume(),
        bounding_volume: shape.bounding_volume().into(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} (scale {})", report.shape, scale);
    println!("  Vertices: {}", report.vertices);
    println!("  Faces: {}", report.faces);
    println!("  Closed: {}", report.closed);
    println!("  Surface area: {:.6}", report.surface_area);
    println!("  Volume: {:.6}", report.volume);
    match report.bounding_volume {
        BoundsInfo::Empty => println!("  Bounds: empty"),
        BoundsInfo::Box { min, max } => {
            println!("  Bounds: box {min:?} .. {max:?}");
        }
        BoundsInfo::Sphere { center, radius } => {
            println!("  Bounds: sphere at {center:?}, radius {radius:.6}");
        }
    }

    Ok(())
}
