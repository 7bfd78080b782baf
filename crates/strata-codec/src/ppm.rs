//! Plain-text PPM (`P3`) support.

use strata_core::{Image, Pixel};

use crate::Codec;
use crate::error::{CodecError, Result};

const MAGIC: &str = "P3";

/// Codec for ASCII PPM files.
///
/// Lines starting with `#` are ignored. The header is the `P3` magic
/// followed by width, height and the maximum channel value; the body lists
/// one RGB triple per pixel in row-major order. Values outside `0..=255` are
/// clamped, and the declared maximum is not used for scaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PpmCodec;

impl Codec for PpmCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Image> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CodecError::Malformed(format!("not valid text: {e}")))?;
        let mut tokens = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .flat_map(str::split_whitespace);

        match tokens.next() {
            Some(MAGIC) => {}
            Some(other) => {
                return Err(CodecError::Malformed(format!(
                    "expected {MAGIC} magic, found {other:?}"
                )));
            }
            None => return Err(CodecError::Malformed("empty input".to_string())),
        }

        let width: u32 = next_number(&mut tokens, "width")?;
        let height: u32 = next_number(&mut tokens, "height")?;
        let _max_value: i64 = next_number(&mut tokens, "maximum value")?;

        let mut pixels = Vec::with_capacity((width as usize * height as usize).min(text.len()));
        for y in 0..height {
            for x in 0..width {
                let r = next_number(&mut tokens, "red sample")?;
                let g = next_number(&mut tokens, "green sample")?;
                let b = next_number(&mut tokens, "blue sample")?;
                pixels.push(Pixel::new(x.into(), y.into(), r, g, b)?);
            }
        }

        Ok(Image::new(width, height, pixels)?)
    }

    fn encode(&self, image: &Image) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let mut out = format!("{MAGIC}\n{width} {height}\n255\n");
        let mut pixels = image.pixels();
        for _ in 0..height {
            let row: Vec<String> = pixels
                .by_ref()
                .take(width as usize)
                .map(|p| format!("{} {} {}", p.red(), p.green(), p.blue()))
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

fn next_number<'a, T, I>(tokens: &mut I, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| CodecError::Malformed(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| CodecError::Malformed(format!("invalid {what}: {token:?}")))
}
