use crate::cli::commands::{ConfigAction, ConfigCmd};
use crate::io::config_io;
use crate::io::context::{Context, Overrides};

pub fn cmd_config(args: ConfigCmd, overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let path = overrides
        .config
        .clone()
        .unwrap_or_else(config_io::config_path);

    match args.action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let ctx = Context::load(overrides)?;
            print!("{}", toml::to_string_pretty(&ctx.config)?);
        }
        ConfigAction::Init { force } => {
            config_io::init_config(&path, force)?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Set { key, value } => {
            config_io::set_value(&path, &key, &value)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
