//! Interactive prompting for values the user left off the command line

use std::io::{BufRead, Write};

/// Ask for a value until `parse` accepts it
///
/// The prompt and any rejection message go to `out`; answers are read one
/// line at a time from `input`. Running out of input is an error.
pub fn prompt_value<T, R, W, F>(
    label: &str,
    input: &mut R,
    out: &mut W,
    parse: F,
) -> Result<T, Box<dyn std::error::Error>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(out, "{}: ", label)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(format!("Aborted: no value given for {}", label).into());
        }

        match parse(line.trim_end_matches(['\r', '\n'])) {
            Ok(value) => return Ok(value),
            Err(msg) => writeln!(out, "Error: {}", msg)?,
        }
    }
}

/// Accept any non-blank answer
pub fn non_blank(input: &str) -> Result<String, String> {
    if input.trim().is_empty() {
        Err("A value is required".to_string())
    } else {
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reprompts_until_valid() {
        let mut input = Cursor::new("\n  \nAcme Tools\n");
        let mut out = Vec::new();

        let value = prompt_value("Company name", &mut input, &mut out, non_blank).unwrap();

        assert_eq!(value, "Acme Tools");
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Company name: ").count(), 3);
        assert_eq!(shown.matches("Error: A value is required").count(), 2);
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let result = prompt_value("Visit date(YYYY-MM-DD)", &mut input, &mut out, non_blank);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Visit date"));
    }
}
