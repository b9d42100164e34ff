//! Trace records and trace file parsing.
//!
//! One access per line: `<op> <hex-address>`, where `op` is `read`/`load`
//! for a load or `write`/`store` for a store (case-insensitive) and the
//! address is hexadecimal with an optional `0x`/`0X` prefix, at most
//! 32 bits.
//! Blank lines are skipped; anything else is a parse error.

use std::path::Path;

use crate::error::SimulatorResult;
use crate::error::TraceError;

/// Kind of memory access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Load,
    Store,
}

/// A single trace record.
/// The LRU sequence number is assigned by the driver during replay, not
/// carried by the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    pub kind: AccessKind,
    pub address: u32,
}

/// Read every access from the trace file
pub fn read_trace_file(path: impl AsRef<Path>) -> SimulatorResult<Vec<Access>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| TraceError::FileReadError(path.into(), e))?;
    Ok(parse_trace(path, &content)?)
}

/// Parse trace content; `path` is only used for diagnostics
pub fn parse_trace(
    path: &Path,
    content: &str,
) -> Result<Vec<Access>, TraceError> {
    let mut accesses = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |detail: String| TraceError::ParseError {
            path: path.into(),
            line: line_num + 1,
            detail,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(parse_error("expected 'op address'".to_string()));
        }

        let kind = match parts[0].to_lowercase().as_str() {
            "read" | "load" => AccessKind::Load,
            "write" | "store" => AccessKind::Store,
            op => {
                return Err(parse_error(format!(
                    "invalid operation '{}': expected read/load/write/store",
                    op
                )))
            }
        };

        let digits = parts[1]
            .strip_prefix("0x")
            .or_else(|| parts[1].strip_prefix("0X"))
            .unwrap_or(parts[1]);
        let address = u32::from_str_radix(digits, 16).map_err(|_| {
            parse_error(format!("invalid hexadecimal address '{}'", parts[1]))
        })?;

        accesses.push(Access { kind, address });
    }

    Ok(accesses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<Access>, TraceError> {
        parse_trace(Path::new("test.trace"), content)
    }

    #[test]
    fn test_parse_operations() {
        let accesses =
            parse("read 00000000\nwrite 0x10\nLOAD 1f4\nStore 0xdeadbeef\n")
                .unwrap();
        assert_eq!(
            accesses,
            vec![
                Access { kind: AccessKind::Load, address: 0x0 },
                Access { kind: AccessKind::Store, address: 0x10 },
                Access { kind: AccessKind::Load, address: 0x1f4 },
                Access { kind: AccessKind::Store, address: 0xdeadbeef },
            ]
        );
    }

    #[test]
    fn test_accepts_uppercase_hex_prefix() {
        // The op word is case-insensitive, so the prefix is too
        let accesses = parse("READ 0X10\nWRITE 0XaB\n").unwrap();
        assert_eq!(
            accesses,
            vec![
                Access { kind: AccessKind::Load, address: 0x10 },
                Access { kind: AccessKind::Store, address: 0xab },
            ]
        );
    }

    #[test]
    fn test_skips_blank_lines() {
        let accesses = parse("\nread 4\n\n   \nwrite 8\n").unwrap();
        assert_eq!(accesses.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_operation() {
        let err = parse("fetch 00000000\n").unwrap_err();
        assert!(matches!(err, TraceError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(parse("read xyz\n").is_err());
        // Exceeds 32 bits
        assert!(parse("read 100000000\n").is_err());
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        assert!(parse("read\n").is_err());
        assert!(parse("read 0 0\n").is_err());
    }
}
