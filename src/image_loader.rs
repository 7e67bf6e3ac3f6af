use crate::error::ImageLoadError;
use crate::state::State;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a big-endian LC-3 image from `path` and loads it into `state`'s memory at the
/// origin encoded in the image's first word. Words beyond `0x10000 - origin` are silently
/// truncated. Loading an image never repositions PC; multiple images may be loaded in
/// sequence and later loads may overwrite earlier ones.
pub fn load_image(state: &mut State, path: &Path) -> Result<(), ImageLoadError> {
    let words = read_words(path)?;
    load_words(state, &words);
    Ok(())
}

fn read_words(path: &Path) -> Result<Vec<u16>, ImageLoadError> {
    let map_err = |source| ImageLoadError {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(map_err)?);
    let mut words = Vec::new();

    loop {
        match reader.read_u16::<BigEndian>() {
            Ok(word) => words.push(word),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(map_err(e)),
        }
    }

    Ok(words)
}

fn load_words(state: &mut State, words: &[u16]) {
    let (origin, payload) = match words.split_first() {
        Some(split) => split,
        None => return,
    };

    let max_words = (u32::from(u16::max_value()) + 1 - u32::from(*origin)) as usize;

    for (i, word) in payload.iter().take(max_words).enumerate() {
        let address = origin.wrapping_add(i as u16);
        state.memory.write(address, *word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;

    fn write_image(words: &[u16]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for word in words {
            file.write_u16::<BigEndian>(*word).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_payload_at_the_declared_origin() {
        let image = write_image(&[0x3000, 0x1111, 0x2222, 0x3333]);
        let mut state = State::new();

        load_image(&mut state, image.path()).unwrap();

        assert_eq!(state.memory.read(0x3000), 0x1111);
        assert_eq!(state.memory.read(0x3001), 0x2222);
        assert_eq!(state.memory.read(0x3002), 0x3333);
    }

    #[test]
    fn missing_file_is_an_image_load_error() {
        let mut state = State::new();

        let err = load_image(&mut state, Path::new("/nonexistent/path.obj")).unwrap_err();

        assert_eq!(err.path, Path::new("/nonexistent/path.obj"));
    }

    #[test]
    fn later_loads_can_overwrite_earlier_ones() {
        let first = write_image(&[0x3000, 0xaaaa]);
        let second = write_image(&[0x3000, 0xbbbb]);
        let mut state = State::new();

        load_image(&mut state, first.path()).unwrap();
        load_image(&mut state, second.path()).unwrap();

        assert_eq!(state.memory.read(0x3000), 0xbbbb);
    }

    #[test]
    fn loading_does_not_reposition_pc() {
        let image = write_image(&[0x5000, 0x1111]);
        let mut state = State::new();

        load_image(&mut state, image.path()).unwrap();

        assert_eq!(state.pc, 0x3000);
    }
}
