use flexi_logger::Logger;

mod command;
mod schema;
mod service;
mod util;

fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;
    command::run()
}
