//! Standalone viewer binary.
//!
//! Usage: `strandview <file.pdb | https://…>`

use strandview::{StructureSource, Viewer};

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder();
    if let Some(arg) = std::env::args().nth(1) {
        let source = if arg.starts_with("http://")
            || arg.starts_with("https://")
        {
            StructureSource::Url(arg)
        } else {
            StructureSource::Path(arg.into())
        };
        builder = builder.with_source(source);
    } else {
        log::info!("no structure given; opening an empty viewer");
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
