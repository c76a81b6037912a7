//! File encoding detection and decoding
//! Detects BOMs and likely encodings so patch text renders correctly

use encoding_rs::Encoding;

/// Byte order mark signatures
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];

/// Detect a BOM at the start of the data and return the encoding + BOM length
pub fn detect_bom(data: &[u8]) -> Option<(&'static Encoding, usize)> {
    if data.len() >= 3 && data[..3] == *BOM_UTF8 {
        return Some((encoding_rs::UTF_8, 3));
    }
    if data.len() >= 2 && data[..2] == *BOM_UTF16_BE {
        return Some((encoding_rs::UTF_16BE, 2));
    }
    if data.len() >= 2 && data[..2] == *BOM_UTF16_LE {
        return Some((encoding_rs::UTF_16LE, 2));
    }
    None
}

/// Check if data appears to be binary (null bytes or many non-text bytes)
pub fn is_binary_data(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }

    let sample_size = data.len().min(8192);
    let sample = &data[..sample_size];

    let mut null_count = 0;
    let mut control_count = 0;

    for &byte in sample {
        if byte == 0 {
            null_count += 1;
        } else if byte < 8 || (byte > 13 && byte < 32 && byte != 27) {
            // Control chars except tab(9), LF(10), VT(11), FF(12), CR(13), ESC(27)
            control_count += 1;
        }
    }

    if null_count > 0 {
        // UTF-16/32 text carries null bytes as part of the encoding
        if detect_bom(data).is_some() {
            return false;
        }
        let even_nulls = sample.iter().step_by(2).filter(|&&b| b == 0).count();
        let odd_nulls = sample.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();
        let half_len = sample_size / 2;
        if half_len > 0 && (even_nulls > half_len * 2 / 5 || odd_nulls > half_len * 2 / 5) {
            return false;
        }
        return true;
    }

    control_count > sample_size / 10
}

/// Detect the likely encoding of file content.
///
/// BOMs win outright, valid UTF-8 is taken at face value, and anything else
/// goes through chardetng's statistical detector.
pub fn detect_encoding(data: &[u8]) -> &'static Encoding {
    if data.is_empty() {
        return encoding_rs::UTF_8;
    }

    if let Some((encoding, _bom_len)) = detect_bom(data) {
        return encoding;
    }

    let sample = if data.len() > 65536 {
        &data[..65536]
    } else {
        data
    };

    if std::str::from_utf8(sample).is_ok() {
        return encoding_rs::UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true)
}

/// Decode raw bytes with the given encoding, skipping a leading BOM
pub fn decode_bytes(data: &[u8], encoding: &'static Encoding) -> String {
    let skip = detect_bom(data).map(|(_, len)| len).unwrap_or(0);
    let (decoded, _, had_errors) = encoding.decode(&data[skip..]);
    if had_errors {
        tracing::warn!("Encountered errors decoding content as {}", encoding.name());
    }
    decoded.into_owned()
}
