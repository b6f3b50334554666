use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use planner::{Catalog, Config};
use tracing::{info, instrument, warn};

use super::{
    menu::{InputError, MENU, MenuChoice, parse_course_number},
    terminal::Palette,
};

/// Runs the interactive menu over a line-oriented input and an output.
///
/// The driver owns the loaded catalogue. Every load builds a new catalogue
/// from the file; what happens to the old one when that fails is set by
/// [`Config::keep_catalog_on_failed_load`].
pub struct Driver<R, W> {
    path: PathBuf,
    config: Config,
    catalog: Option<Catalog>,
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    #[must_use]
    pub const fn new(path: PathBuf, config: Config, input: R, output: W, palette: Palette) -> Self {
        Self {
            path,
            config,
            catalog: None,
            input,
            output,
            palette,
        }
    }

    /// Shows the menu and handles choices until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only failures to read the input or write the output are returned.
    /// Rejected input and failed loads are reported and the menu shown again.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the course planner.")?;

        while let Some(choice) = self.menu()? {
            match choice {
                MenuChoice::Load => self.load()?,
                MenuChoice::List => self.list()?,
                MenuChoice::Find => self.find()?,
                MenuChoice::Exit => break,
            }
        }

        writeln!(self.output, "\nThank you for using the course planner!\n")?;
        Ok(())
    }

    /// Displays the menu until a valid choice is made.
    ///
    /// Returns `None` when the input is exhausted.
    fn menu(&mut self) -> io::Result<Option<MenuChoice>> {
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "Enter choice: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.parse::<MenuChoice>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => self.reject(&e)?,
            }
        }
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&mut self) -> io::Result<()> {
        match Catalog::load(&self.path, self.config.delimiter()) {
            Ok(catalog) => {
                info!(courses = catalog.len(), "catalogue loaded");
                let message = format!("\nLoaded {} courses", catalog.len());
                writeln!(self.output, "{}", self.palette.success(&message))?;
                self.catalog = Some(catalog);
            }
            Err(e) => {
                warn!("load failed: {e}");
                writeln!(self.output, "\n{}", self.palette.warning(&format!("Error: {e}")))?;

                if self.config.keep_catalog_on_failed_load && self.catalog.is_some() {
                    let hint = "The previously loaded courses are still available.";
                    writeln!(self.output, "{}", self.palette.hint(hint))?;
                } else {
                    self.catalog = None;
                }
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn list(&mut self) -> io::Result<()> {
        let Some(catalog) = &self.catalog else {
            return self.not_loaded();
        };

        writeln!(
            self.output,
            "\n  {}\n",
            self.palette.heading("Here is a sample schedule:")
        )?;
        for course in catalog {
            writeln!(self.output, "{}", course.summary())?;
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn find(&mut self) -> io::Result<()> {
        write!(self.output, "What course do you want to know about? ")?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        let number = match parse_course_number(&line) {
            Ok(number) => number,
            Err(e) => return self.reject(&e),
        };

        let Some(course) = self.catalog.as_ref().and_then(|c| c.search(&number)) else {
            writeln!(self.output, "\nNo matching course found.")?;
            return if self.catalog.is_none() {
                self.not_loaded()
            } else {
                Ok(())
            };
        };
        writeln!(self.output, "\n{}", course.details())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut self.input)
    }

    fn reject(&mut self, error: &InputError) -> io::Result<()> {
        writeln!(self.output, "\n{}", self.palette.warning(error))
    }

    fn not_loaded(&mut self) -> io::Result<()> {
        let hint = format!(
            "No courses loaded. Choose option {} to load {}.",
            MenuChoice::Load,
            self.path.display()
        );
        writeln!(self.output, "\n{}", self.palette.hint(&hint))
    }
}

/// Asks for the catalogue file, offering `default` if nothing is entered.
///
/// # Errors
///
/// Returns any error reading the answer or writing the prompt.
pub fn prompt_for_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &Path,
) -> io::Result<PathBuf> {
    writeln!(
        output,
        "Please enter the path to the csv data file [{}]:",
        default.display()
    )?;
    output.flush()?;

    let line = read_trimmed_line(input)?.unwrap_or_default();

    Ok(if line.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(line)
    })
}

/// Reads one line, replacing bytes that aren't UTF-8 so they are rejected as
/// input rather than ending the session. `None` at end of input.
fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}
