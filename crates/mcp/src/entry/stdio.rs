#![forbid(unsafe_code)]

use super::framing::{Frame, FrameReader, Framing, write_frame};
use crate::{INVALID_REQUEST, McpServer, json_rpc_error};
use std::io::{self, BufRead, Write};

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut frames = FrameReader::new(stdin.lock());
    let mut stdout = io::stdout().lock();
    serve(server, &mut frames, &mut stdout)?;
    Ok(())
}

pub(crate) fn serve<R: BufRead, W: Write>(
    server: &mut McpServer,
    frames: &mut FrameReader<R>,
    out: &mut W,
) -> io::Result<()> {
    while let Some(frame) = frames.next_frame()? {
        let framing = frames.framing().unwrap_or(Framing::NewlineJson);
        let response = match frame {
            Frame::Message(body) => server.handle_raw(&body),
            Frame::Oversized => Some(json_rpc_error(
                None,
                INVALID_REQUEST,
                "Invalid Request: message exceeds max allowed size",
            )),
        };
        if let Some(response) = response {
            write_frame(out, framing, &response)?;
        }
    }
    Ok(())
}
