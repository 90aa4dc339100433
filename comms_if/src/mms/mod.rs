//! # mms Client
//!
//! The mms micromouse simulator launches the mouse program as a child process and exchanges one
//! line per command: the program writes commands to its stdout and reads responses from its
//! stdin. Queries (`mazeWidth`, `wallFront`, ...) answer with a value, actuators answer `ack` or
//! `crash`, display commands have no response. Anything written to stderr is shown in the
//! simulator's log window.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use log::{trace, warn};

use crate::eqpt::{Colour, MouseError, MouseIf};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client speaking the mms protocol over a reader/writer pair.
pub struct MmsClient<R, W>
where
    R: BufRead,
    W: Write,
{
    reader: R,
    writer: W,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MmsClient<BufReader<Stdin>, Stdout> {
    /// Connect to the simulator through the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> MmsClient<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the client, returning the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Send a command which has no response.
    fn send(&mut self, cmd: &str) -> Result<(), MouseError> {
        trace!("mms <- {}", cmd);
        writeln!(self.writer, "{}", cmd)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send a command and wait for its single line response.
    fn request(&mut self, cmd: &str) -> Result<String, MouseError> {
        self.send(cmd)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(MouseError::Disconnected);
        }

        let response = line.trim().to_string();
        trace!("mms -> {}", response);
        Ok(response)
    }

    fn request_bool(&mut self, cmd: &str) -> Result<bool, MouseError> {
        match self.request(cmd)?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(MouseError::UnexpectedResponse(cmd.into(), other.into())),
        }
    }

    fn request_usize(&mut self, cmd: &str) -> Result<usize, MouseError> {
        let response = self.request(cmd)?;
        response
            .parse()
            .map_err(|_| MouseError::UnexpectedResponse(cmd.into(), response))
    }

    fn request_ack(&mut self, cmd: &str) -> Result<(), MouseError> {
        match self.request(cmd)?.as_str() {
            "ack" => Ok(()),
            "crash" => Err(MouseError::Crashed),
            other => Err(MouseError::UnexpectedResponse(cmd.into(), other.into())),
        }
    }

    /// Display commands are fire and forget, a failure to send one is only worth a warning.
    fn send_display(&mut self, cmd: &str) {
        if let Err(e) = self.send(cmd) {
            warn!("Could not send display command `{}`: {}", cmd, e);
        }
    }
}

/// Build a sensor command, appending the lookahead only when it's non-zero.
fn sensor_cmd(name: &str, lookahead: usize) -> String {
    match lookahead {
        0 => name.to_string(),
        n => format!("{} {}", name, n),
    }
}

impl<R, W> MouseIf for MmsClient<R, W>
where
    R: BufRead,
    W: Write,
{
    fn maze_width(&mut self) -> Result<usize, MouseError> {
        self.request_usize("mazeWidth")
    }

    fn maze_height(&mut self) -> Result<usize, MouseError> {
        self.request_usize("mazeHeight")
    }

    fn wall_front(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.request_bool(&sensor_cmd("wallFront", lookahead))
    }

    fn wall_left(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.request_bool(&sensor_cmd("wallLeft", lookahead))
    }

    fn wall_right(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.request_bool(&sensor_cmd("wallRight", lookahead))
    }

    fn wall_back(&mut self) -> Result<bool, MouseError> {
        self.request_bool("wallBack")
    }

    fn turn_left(&mut self) -> Result<(), MouseError> {
        self.request_ack("turnLeft")
    }

    fn turn_right(&mut self) -> Result<(), MouseError> {
        self.request_ack("turnRight")
    }

    fn move_forward(&mut self) -> Result<(), MouseError> {
        self.request_ack("moveForward")
    }

    fn set_color(&mut self, x: usize, y: usize, colour: Colour) {
        self.send_display(&format!("setColor {} {} {}", x, y, colour.code()))
    }

    fn set_text(&mut self, x: usize, y: usize, text: &str) {
        self.send_display(&format!("setText {} {} {}", x, y, text))
    }

    fn clear_all_color(&mut self) {
        self.send_display("clearAllColor")
    }

    fn clear_all_text(&mut self) {
        self.send_display("clearAllText")
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn client(responses: &str) -> MmsClient<Cursor<Vec<u8>>, Vec<u8>> {
        MmsClient::new(Cursor::new(responses.as_bytes().to_vec()), Vec::new())
    }

    fn sent(client: MmsClient<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(client.into_inner().1).unwrap()
    }

    #[test]
    fn test_queries() {
        let mut c = client("16\n8\ntrue\nfalse\ntrue\nfalse\n");

        assert_eq!(c.maze_width().unwrap(), 16);
        assert_eq!(c.maze_height().unwrap(), 8);
        assert!(c.wall_front(0).unwrap());
        assert!(!c.wall_left(0).unwrap());
        assert!(c.wall_right(2).unwrap());
        assert!(!c.wall_back().unwrap());

        assert_eq!(
            sent(c),
            "mazeWidth\nmazeHeight\nwallFront\nwallLeft\nwallRight 2\nwallBack\n"
        );
    }

    #[test]
    fn test_actuators() {
        let mut c = client("ack\nack\nack\ncrash\n");

        c.turn_left().unwrap();
        c.turn_right().unwrap();
        c.move_forward().unwrap();
        assert!(matches!(c.move_forward(), Err(MouseError::Crashed)));
    }

    #[test]
    fn test_bad_responses() {
        let mut c = client("wide\nmaybe\n");

        assert!(matches!(
            c.maze_width(),
            Err(MouseError::UnexpectedResponse(cmd, resp)) if cmd == "mazeWidth" && resp == "wide"
        ));
        assert!(matches!(
            c.wall_front(0),
            Err(MouseError::UnexpectedResponse(_, _))
        ));
        assert!(matches!(c.turn_left(), Err(MouseError::Disconnected)));
    }

    #[test]
    fn test_display_has_no_response() {
        let mut c = client("true\n");

        c.set_color(1, 2, Colour::DarkYellow);
        c.set_text(0, 0, "12");
        c.clear_all_color();
        c.clear_all_text();

        // The only response in the stream is still available to the next query
        assert!(c.wall_back().unwrap());

        assert_eq!(
            sent(c),
            "setColor 1 2 Y\nsetText 0 0 12\nclearAllColor\nclearAllText\nwallBack\n"
        );
    }
}
