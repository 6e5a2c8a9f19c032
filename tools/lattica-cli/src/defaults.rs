//! `lattica defaults` - print a shape's default parameters

use anyhow::Result;
use clap::Args;
use lattica::{ShapeConfig, ShapeKind};

use crate::config_file;

#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Shape kind (e.g. `sphere`, `torus_knot`)
    #[arg(value_parser = crate::parse_shape)]
    pub shape: ShapeKind,
}

pub fn execute(args: DefaultsArgs) -> Result<()> {
    let config = ShapeConfig::from_kind(args.shape)?;
    print!("{}", config_file::to_toml(&config)?);
    Ok(())
}
