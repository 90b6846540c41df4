use std::{
    env,
    fs::File,
    io::{self, Seek, SeekFrom},
};

use log::LevelFilter;
use simple_logger::SimpleLogger;

use textstream::{TextRead, TextStream};

fn main() -> io::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Trace)
        .with_colors(false)
        .init()
        .unwrap();

    let path = env::args().nth(1).unwrap_or_else(|| "/etc/os-release".to_owned());
    let mut stream = TextStream::new(File::open(&path)?)?;
    log::info!("{}: {}, text starts at byte {}", path, stream.encoding(), stream.position()?);

    let head = stream.read_runes(16)?;
    log::info!("First runes: {:?}", head.iter().collect::<String>());
    log::debug!("Position after runes: {}", stream.position()?);

    let start = stream.seek(SeekFrom::Start(0))?;
    log::trace!("Seek Start(0): {}", start);
    log::debug!("Raw first byte: {:?}", stream.peek_byte()?);

    let mut units = 0;
    for unit in (&mut stream).chars() {
        unit?;
        units += 1;
    }
    log::info!("{} UTF-16 code units until the end or the first malformed sequence", units);

    Ok(())
}
