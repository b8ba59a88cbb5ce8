//! Shared HTTP agent and size-bounded response readers.

use std::io::{self, Read, Write};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(120);
const WRITE_TIMEOUT: Duration = Duration::from_secs(120);
const USER_AGENT: &str = concat!("sheetdigest/", env!("CARGO_PKG_VERSION"));

/// Return the process-wide HTTP agent.
///
/// Read and write timeouts are generous because the service parses the whole
/// spreadsheet before it answers an upload.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
    })
}

/// Read a response into memory, failing once it grows past `max_bytes`.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    let mut bytes = Vec::new();
    copy_response_to_writer(response, &mut bytes, max_bytes)?;
    Ok(bytes)
}

/// Read a response body as text, replacing invalid UTF-8.
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let bytes = read_response_bytes(response, max_bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Stream a response into `writer`, returning the number of bytes written.
pub(crate) fn copy_response_to_writer(
    response: ureq::Response,
    writer: &mut impl Write,
    max_bytes: usize,
) -> Result<u64, io::Error> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut total = 0usize;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let read = limited.read(&mut buf)?;
        if read == 0 {
            break;
        }
        total += read;
        if total > max_bytes {
            return Err(too_large(format!("Response exceeded {max_bytes} bytes")));
        }
        writer.write_all(&buf[..read])?;
    }
    Ok(total as u64)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
    else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(too_large(format!("Response too large: {length} bytes")));
    }
    Ok(())
}

fn too_large(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
