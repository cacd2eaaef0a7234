// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::InertiaError;

const MAGIC: &[u8; 6] = b"\x93NUMPY";

struct NpyHeader {
    descr: String,
    fortran_order: bool,
    shape: Vec<usize>,
}

#[derive(Clone, Copy, Debug)]
enum ByteOrder {
    Little,
    Big,
}

const NATIVE_ORDER: ByteOrder = if cfg!(target_endian = "little") {
    ByteOrder::Little
} else {
    ByteOrder::Big
};

/// Decodes a float32/float64 `.npy` payload with at most two dimensions.
///
/// Returns row-major values and `(rows, columns)`; a 0-d array is one
/// sample and a 1-d array is a single column.
pub fn parse_npy_bytes(bytes: &[u8]) -> Result<(Vec<f64>, (usize, usize)), InertiaError> {
    if bytes.len() < 10 {
        return Err(InertiaError::invalid_input(
            "NPY input is too short to contain a valid header",
        ));
    }
    if &bytes[..6] != MAGIC {
        return Err(InertiaError::invalid_input(
            "invalid NPY magic; expected '\\x93NUMPY'",
        ));
    }

    let (header_offset, header_len) = match bytes[6] {
        1 => (10usize, u16::from_le_bytes([bytes[8], bytes[9]]) as usize),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err(InertiaError::invalid_input(
                    "NPY header is truncated for version >= 2",
                ));
            }
            (
                12usize,
                u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize,
            )
        }
        other => {
            return Err(InertiaError::not_supported(format!(
                "unsupported NPY version {other}; expected major version 1, 2, or 3"
            )));
        }
    };

    let header_end = header_offset
        .checked_add(header_len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| {
            InertiaError::invalid_input("NPY header exceeds file length; file is truncated")
        })?;
    let header_text = std::str::from_utf8(&bytes[header_offset..header_end])
        .map_err(|_| InertiaError::invalid_input("NPY header is not valid UTF-8"))?;
    let header = parse_header(header_text)?;

    let (rows, cols) = match header.shape.as_slice() {
        [] => (1usize, 1usize),
        [n] => (*n, 1usize),
        [n, d] => (*n, *d),
        _ => {
            return Err(InertiaError::invalid_input(format!(
                "NPY shape {:?} is not a flat signal; expected at most 2 dimensions",
                header.shape
            )));
        }
    };
    let element_count = rows
        .checked_mul(cols)
        .ok_or_else(|| InertiaError::invalid_input("NPY shape overflow"))?;
    let (byte_order, width) = parse_descr(&header.descr)?;

    let payload = &bytes[header_end..];
    let expected_len = element_count
        .checked_mul(width)
        .ok_or_else(|| InertiaError::invalid_input("NPY payload length overflow"))?;
    if payload.len() != expected_len {
        return Err(InertiaError::invalid_input(format!(
            "NPY payload length mismatch: got {}, expected {expected_len} for shape {:?} and descr '{}'",
            payload.len(),
            header.shape,
            header.descr
        )));
    }

    let values: Vec<f64> = if width == 4 {
        payload
            .chunks_exact(4)
            .map(|chunk| {
                let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
                f64::from(match byte_order {
                    ByteOrder::Little => f32::from_le_bytes(raw),
                    ByteOrder::Big => f32::from_be_bytes(raw),
                })
            })
            .collect()
    } else {
        payload
            .chunks_exact(8)
            .map(|chunk| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                match byte_order {
                    ByteOrder::Little => f64::from_le_bytes(raw),
                    ByteOrder::Big => f64::from_be_bytes(raw),
                }
            })
            .collect()
    };

    if header.fortran_order && rows > 1 && cols > 1 {
        let mut row_major = vec![0.0f64; element_count];
        for row in 0..rows {
            for col in 0..cols {
                row_major[row * cols + col] = values[col * rows + row];
            }
        }
        return Ok((row_major, (rows, cols)));
    }

    Ok((values, (rows, cols)))
}

fn parse_header(header: &str) -> Result<NpyHeader, InertiaError> {
    Ok(NpyHeader {
        descr: header_string(header, "descr")?,
        fortran_order: header_bool(header, "fortran_order")?,
        shape: header_shape(header, "shape")?,
    })
}

fn header_field<'a>(header: &'a str, key: &str) -> Result<&'a str, InertiaError> {
    let marker = format!("'{key}':");
    let start = header.find(marker.as_str()).ok_or_else(|| {
        InertiaError::invalid_input(format!("NPY header missing required key '{key}'"))
    })?;
    Ok(header[start + marker.len()..].trim_start())
}

fn header_string(header: &str, key: &str) -> Result<String, InertiaError> {
    let rest = header_field(header, key)?;
    let body = rest
        .strip_prefix('\'')
        .and_then(|after| after.find('\'').map(|end| &after[..end]))
        .ok_or_else(|| {
            InertiaError::invalid_input(format!(
                "NPY header field '{key}' must be a quoted string"
            ))
        })?;
    Ok(body.to_string())
}

fn header_bool(header: &str, key: &str) -> Result<bool, InertiaError> {
    let rest = header_field(header, key)?;
    if rest.starts_with("True") {
        Ok(true)
    } else if rest.starts_with("False") {
        Ok(false)
    } else {
        Err(InertiaError::invalid_input(format!(
            "NPY header field '{key}' must be True or False"
        )))
    }
}

fn header_shape(header: &str, key: &str) -> Result<Vec<usize>, InertiaError> {
    let rest = header_field(header, key)?;
    let body = rest
        .strip_prefix('(')
        .and_then(|after| after.find(')').map(|end| &after[..end]))
        .ok_or_else(|| {
            InertiaError::invalid_input(format!("NPY header field '{key}' must be a tuple"))
        })?;
    body.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>().map_err(|_| {
                InertiaError::invalid_input(format!(
                    "NPY shape entry '{part}' is not a valid non-negative integer"
                ))
            })
        })
        .collect()
}

fn parse_descr(descr: &str) -> Result<(ByteOrder, usize), InertiaError> {
    let trimmed = descr.trim();
    let (byte_order, dtype) = match trimmed.chars().next() {
        Some('<') => (ByteOrder::Little, &trimmed[1..]),
        Some('>') => (ByteOrder::Big, &trimmed[1..]),
        Some('|') | Some('=') => (NATIVE_ORDER, &trimmed[1..]),
        Some('f') => (NATIVE_ORDER, trimmed),
        _ => {
            return Err(InertiaError::invalid_input(format!(
                "unsupported NPY descr '{trimmed}'; expected floating-point dtype f4 or f8"
            )));
        }
    };

    match dtype {
        "f4" => Ok((byte_order, 4)),
        "f8" => Ok((byte_order, 8)),
        _ => Err(InertiaError::invalid_input(format!(
            "unsupported NPY dtype '{dtype}'; expected f4 or f8"
        ))),
    }
}
