use std::io::{BufRead, Write};

use anyhow::Result;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::booking::ClassId;
use crate::catalog::Catalog;
use crate::input::Input;
use crate::transcript::Transcript;

const MENU: [&str; 4] = [
    "1. Book a class",
    "2. Cancel a booking",
    "3. View class bookings",
    "4. Exit",
];

/// Outcome of asking the user for something.
enum Reply<T> {
    Value(T),
    /// Unusable answer, already reported; back to the main menu
    Invalid,
    /// Input exhausted
    Closed,
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// Unwrap a `Reply`, returning from the handler on anything but a value.
macro_rules! answer {
    ($reply:expr) => {
        match $reply {
            Reply::Value(v) => v,
            Reply::Invalid => return Ok(Step::Continue),
            Reply::Closed => return Ok(Step::Quit),
        }
    };
}

/// The interactive booking menu over one catalog.
pub struct Session<R, C: Write, F: Write> {
    catalog: Catalog,
    timezone: Option<Tz>,
    input: Input<R>,
    out: Transcript<C, F>,
}

impl<R: BufRead, C: Write, F: Write> Session<R, C, F> {
    pub fn new(catalog: Catalog, timezone: Option<Tz>, input: R, out: Transcript<C, F>) -> Self {
        Self {
            catalog,
            timezone,
            input: Input::new(input),
            out,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_parts(self) -> (Catalog, Transcript<C, F>) {
        (self.catalog, self.out)
    }

    /// Serve the menu until the user exits or input runs out.
    pub fn run(&mut self) -> Result<()> {
        info!("Session started with {} classes", self.catalog.len());
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "Welcome to the Fitness Class Booking System!")?;
            for line in MENU {
                writeln!(self.out, "{}", line)?;
            }
            let choice = match self.ask_number("Enter your choice: ")? {
                Reply::Value(n) => n,
                Reply::Invalid => continue,
                Reply::Closed => break,
            };

            let step = match choice {
                1 => self.book()?,
                2 => self.cancel()?,
                3 => self.view()?,
                4 => {
                    writeln!(self.out, "Goodbye!")?;
                    Step::Quit
                }
                _ => {
                    warn!("Invalid menu choice {}", choice);
                    self.input.discard_pending();
                    writeln!(self.out, "Invalid choice.")?;
                    Step::Continue
                }
            };
            if step == Step::Quit {
                break;
            }
        }
        self.out.finish()?;
        info!("Session ended");
        Ok(())
    }

    fn book(&mut self) -> Result<Step> {
        let id = answer!(self.select_class()?);
        if let Some(class) = self.catalog.get(id) {
            class.write_available_slots(&mut self.out)?;
        }
        let number = answer!(self.ask_number("Enter the slot number you want to book: ")?);
        let name = answer!(self.ask_token("Enter your name: ")?);

        let Some(slot) = to_index(number) else {
            writeln!(
                self.out,
                "Failed to book the selected slot: slot {} does not exist",
                number
            )?;
            return Ok(Step::Continue);
        };
        let Some(class) = self.catalog.get_mut(id) else {
            return Ok(Step::Continue);
        };
        let class_name = class.name().to_string();
        match class.book_slot(&name, slot) {
            Ok(booking) => {
                let confirmation = booking.confirmation(&class_name, self.timezone);
                writeln!(self.out, "Booking successful!")?;
                writeln!(self.out, "{}", confirmation)?;
            }
            Err(e) => {
                writeln!(self.out, "Failed to book the selected slot: {}", e)?;
            }
        }
        Ok(Step::Continue)
    }

    fn cancel(&mut self) -> Result<Step> {
        let id = answer!(self.select_class()?);
        if let Some(class) = self.catalog.get(id) {
            class.write_bookings(&mut self.out)?;
        }
        let name = answer!(self.ask_token("Enter your name: ")?);
        let number = answer!(self.ask_number("Enter the booking number you want to cancel: ")?);

        let Some(position) = to_index(number) else {
            writeln!(self.out, "Failed to cancel: {} has no booking #{}", name, number)?;
            return Ok(Step::Continue);
        };
        let Some(class) = self.catalog.get_mut(id) else {
            return Ok(Step::Continue);
        };
        match class.cancel_booking(&name, position) {
            Ok(booking) => {
                writeln!(
                    self.out,
                    "Booking cancelled for {} (slot {}).",
                    name,
                    booking.slot() + 1
                )?;
            }
            Err(e) => {
                writeln!(self.out, "Failed to cancel: {}", e)?;
            }
        }
        Ok(Step::Continue)
    }

    fn view(&mut self) -> Result<Step> {
        let id = answer!(self.select_class()?);
        if let Some(class) = self.catalog.get(id) {
            class.write_available_slots(&mut self.out)?;
            class.write_bookings(&mut self.out)?;
        }
        Ok(Step::Continue)
    }

    fn select_class(&mut self) -> Result<Reply<ClassId>> {
        writeln!(self.out, "Select a class:")?;
        for (i, class) in self.catalog.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, class.name())?;
        }
        let number = match self.ask_number("Enter the class number: ")? {
            Reply::Value(n) => n,
            Reply::Invalid => return Ok(Reply::Invalid),
            Reply::Closed => return Ok(Reply::Closed),
        };
        match self.catalog.by_menu_number(number) {
            Some(id) => Ok(Reply::Value(id)),
            None => {
                warn!("Invalid class choice {}", number);
                self.input.discard_pending();
                writeln!(self.out, "Invalid class choice.")?;
                Ok(Reply::Invalid)
            }
        }
    }

    fn ask_token(&mut self, prompt: &str) -> Result<Reply<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        match self.input.next_token()? {
            Some(token) => {
                self.out.record_input(&token)?;
                Ok(Reply::Value(token))
            }
            None => {
                writeln!(self.out)?;
                Ok(Reply::Closed)
            }
        }
    }

    fn ask_number(&mut self, prompt: &str) -> Result<Reply<i64>> {
        let token = match self.ask_token(prompt)? {
            Reply::Value(t) => t,
            Reply::Invalid => return Ok(Reply::Invalid),
            Reply::Closed => return Ok(Reply::Closed),
        };
        match token.parse::<i64>() {
            Ok(n) => Ok(Reply::Value(n)),
            Err(_) => {
                warn!("Rejected non-numeric input {:?}", token);
                self.input.discard_pending();
                writeln!(self.out, "Invalid input, please enter a number.")?;
                Ok(Reply::Invalid)
            }
        }
    }
}

/// Convert a 1-based number typed by the user into an index.
fn to_index(number: i64) -> Option<usize> {
    usize::try_from(number).ok()?.checked_sub(1)
}
