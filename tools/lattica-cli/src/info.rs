//! `lattica info` - generate a shape and report on the result

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, ValueEnum};
use glam::Vec3;
use lattica::{
    AttribFlags, AttribKind, GenerateRequest, Geometry, IndexSize, ShapeConfig, ShapeKind,
    WindingOrder, generate_with,
};
use tracing::info;

use crate::config_file;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["config", "shape"])))]
pub struct InfoArgs {
    /// Shape config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shape kind, generated with its default parameters
    #[arg(short, long, value_parser = crate::parse_shape)]
    pub shape: Option<ShapeKind>,

    /// Attribute streams to generate
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["position", "normal", "texcoord"]
    )]
    pub attributes: Vec<Attribute>,

    /// Index width in bits (narrowest fitting width when omitted)
    #[arg(long, value_enum)]
    pub index_size: Option<IndexWidth>,

    /// Override the config's winding order
    #[arg(long, value_enum)]
    pub winding: Option<Winding>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Attribute {
    Position,
    Normal,
    Texcoord,
    Tangent,
    Bitangent,
}

impl From<Attribute> for AttribKind {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Position => AttribKind::Position,
            Attribute::Normal => AttribKind::Normal,
            Attribute::Texcoord => AttribKind::Texcoord,
            Attribute::Tangent => AttribKind::Tangent,
            Attribute::Bitangent => AttribKind::Bitangent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexWidth {
    #[value(name = "8")]
    U8,
    #[value(name = "16")]
    U16,
    #[value(name = "32")]
    U32,
}

impl From<IndexWidth> for IndexSize {
    fn from(width: IndexWidth) -> Self {
        match width {
            IndexWidth::U8 => IndexSize::U8,
            IndexWidth::U16 => IndexSize::U16,
            IndexWidth::U32 => IndexSize::U32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Winding {
    Ccw,
    Cw,
}

impl From<Winding> for WindingOrder {
    fn from(winding: Winding) -> Self {
        match winding {
            Winding::Ccw => WindingOrder::CounterClockwise,
            Winding::Cw => WindingOrder::Clockwise,
        }
    }
}

impl InfoArgs {
    fn shape_config(&self) -> Result<ShapeConfig> {
        let mut config = match (&self.config, self.shape) {
            (Some(path), _) => {
                info!("Loading shape config from {}", path.display());
                config_file::load(path)?
            }
            (None, Some(kind)) => ShapeConfig::from_kind(kind)?,
            (None, None) => anyhow::bail!("Either --config or --shape is required"),
        };
        if let Some(winding) = self.winding {
            config.common_mut().winding_order = winding.into();
        }
        Ok(config)
    }

    fn request(&self) -> GenerateRequest {
        let attributes = self
            .attributes
            .iter()
            .fold(AttribFlags::empty(), |flags, &a| flags | AttribKind::from(a).flag());
        GenerateRequest {
            attributes,
            index_size: self.index_size.map(IndexSize::from),
        }
    }
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let config = args.shape_config()?;
    let geometry = generate_with(&config, &args.request())
        .with_context(|| format!("Failed to generate {}", config.kind()))?;

    print!("{}", Report::new(config.kind(), &geometry));
    Ok(())
}

/// The numbers shown by the viewer's info panel
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub shape: ShapeKind,
    pub vertices: u32,
    pub triangles: u32,
    pub index_size: Option<IndexSize>,
    pub attributes: Vec<AttribKind>,
    pub bytes: usize,
    pub bounds: Option<(Vec3, Vec3)>,
}

impl Report {
    pub fn new(shape: ShapeKind, geometry: &Geometry) -> Self {
        let bounds = geometry.positions().and_then(|positions| {
            positions.iter().map(|&p| Vec3::from_array(p)).fold(None, |acc, p| {
                Some(match acc {
                    None => (p, p),
                    Some((min, max)) => (p.min(min), p.max(max)),
                })
            })
        });

        Self {
            shape,
            vertices: geometry.num_vertices(),
            triangles: geometry.triangle_count(),
            index_size: geometry.index_buffer().map(|b| b.size()),
            attributes: geometry.attributes().map(|b| b.kind()).collect(),
            bytes: geometry.byte_size(),
            bounds,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes: Vec<_> = self.attributes.iter().map(|a| a.name()).collect();

        writeln!(f, "Shape:      {}", self.shape)?;
        writeln!(f, "Vertices:   {}", self.vertices)?;
        writeln!(f, "Triangles:  {}", self.triangles)?;
        match self.index_size {
            Some(size) => writeln!(f, "Indices:    {}-bit", size.bytes() * 8)?,
            None => writeln!(f, "Indices:    none")?,
        }
        writeln!(f, "Attributes: {}", attributes.join(", "))?;
        writeln!(f, "Memory:     {:.1} KB ({} bytes)", self.bytes as f64 / 1024.0, self.bytes)?;
        if let Some((min, max)) = self.bounds {
            writeln!(
                f,
                "Bounds:     ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                min.x, min.y, min.z, max.x, max.y, max.z
            )?;
        }
        Ok(())
    }
}
