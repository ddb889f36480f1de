//! Interactive customer menu.
//!
//! # Responsibility
//! - Render the menu, read free-text answers and call the customer service.
//! - Print results, or the message of any service error, then loop.
//!
//! # Invariants
//! - One menu choice maps to exactly one service operation.
//! - A failing action never ends the loop; only `Exit`, end of input or a
//!   console I/O error do.

use log::debug;
use rolodex_core::{Customer, CustomerId, CustomerRepository, CustomerService, CustomerServiceError};
use std::io::{self, BufRead, Write};

const RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ListAll,
    GetById,
    Create,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 6] = [
        Self::ListAll,
        Self::GetById,
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Exit,
    ];

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::ListAll),
            "2" => Some(Self::GetById),
            "3" => Some(Self::Create),
            "4" => Some(Self::Update),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }

    fn key(self) -> u8 {
        match self {
            Self::ListAll => 1,
            Self::GetById => 2,
            Self::Create => 3,
            Self::Update => 4,
            Self::Delete => 5,
            Self::Exit => 6,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ListAll => "List all customers",
            Self::GetById => "Get customer by ID",
            Self::Create => "Create customer",
            Self::Update => "Update customer",
            Self::Delete => "Delete customer",
            Self::Exit => "Exit",
        }
    }

    fn event_name(self) -> &'static str {
        match self {
            Self::ListAll => "list_all",
            Self::GetById => "get_by_id",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug)]
enum ActionError {
    Service(CustomerServiceError),
    Io(io::Error),
    EndOfInput,
}

impl From<CustomerServiceError> for ActionError {
    fn from(value: CustomerServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<io::Error> for ActionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

type ActionResult<T> = Result<T, ActionError>;

/// Console session: the input/output pair plus the service every menu action
/// runs against.
pub struct Session<'svc, R, W, Repo>
where
    R: BufRead,
    W: Write,
    Repo: CustomerRepository,
{
    input: R,
    output: W,
    service: &'svc CustomerService<Repo>,
}

impl<'svc, R, W, Repo> Session<'svc, R, W, Repo>
where
    R: BufRead,
    W: Write,
    Repo: CustomerRepository,
{
    pub fn new(input: R, output: W, service: &'svc CustomerService<Repo>) -> Self {
        Self {
            input,
            output,
            service,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// Only console I/O failures are returned; service errors are printed.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Rolodex customer management v{}",
            rolodex_core::core_version()
        )?;

        loop {
            self.render_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let outcome = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "\nGoodbye!")?;
                    break;
                }
                Some(choice) => {
                    debug!(
                        "event=menu_action module=cli status=start action={}",
                        choice.event_name()
                    );
                    self.dispatch(choice)
                }
                None => {
                    writeln!(self.output, "\nInvalid option. Please try again.")?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(ActionError::Service(err)) => writeln!(self.output, "\nError: {err}")?,
                Err(ActionError::Io(err)) => return Err(err),
                Err(ActionError::EndOfInput) => break,
            }

            write!(self.output, "\nPress Enter to continue...")?;
            self.output.flush()?;
            if self.read_line()?.is_none() {
                break;
            }
        }

        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> ActionResult<()> {
        match choice {
            MenuChoice::ListAll => self.list_all(),
            MenuChoice::GetById => self.get_by_id(),
            MenuChoice::Create => self.create(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn render_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{RULE}\nMAIN MENU\n{RULE}")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    fn list_all(&mut self) -> ActionResult<()> {
        let customers = self.service.get_all()?;
        writeln!(self.output, "\n=== ALL CUSTOMERS ===\n")?;
        if customers.is_empty() {
            writeln!(self.output, "No customers found.")?;
        }
        for customer in &customers {
            self.print_customer(customer)?;
            writeln!(self.output, "{RULE}")?;
        }
        Ok(())
    }

    fn get_by_id(&mut self) -> ActionResult<()> {
        let Some(id) = self.prompt_id("\nEnter customer ID: ")? else {
            return Ok(());
        };
        let customer = self.service.get_by_id(id)?;
        writeln!(self.output, "\n=== CUSTOMER DETAILS ===\n")?;
        self.print_customer(&customer)?;
        Ok(())
    }

    fn create(&mut self) -> ActionResult<()> {
        writeln!(self.output, "\n=== CREATE CUSTOMER ===\n")?;
        let name = self.prompt("Name: ")?;
        let email = self.prompt("Email: ")?;
        let phone = self.prompt("Phone number: ")?;

        let draft = Customer::new(name, email, non_blank(phone));
        let created = self.service.create(&draft)?;
        writeln!(
            self.output,
            "\nCustomer created successfully with ID: {}",
            created.id
        )?;
        Ok(())
    }

    fn update(&mut self) -> ActionResult<()> {
        let Some(id) = self.prompt_id("\nEnter customer ID to update: ")? else {
            return Ok(());
        };
        let mut customer = self.service.get_by_id(id)?;
        writeln!(self.output, "\n=== UPDATE CUSTOMER ===\n")?;

        writeln!(self.output, "Current name: {}", customer.name)?;
        if let Some(name) = non_blank(self.prompt("New name (Enter to keep current): ")?) {
            customer.name = name;
        }

        writeln!(self.output, "Current email: {}", customer.email)?;
        if let Some(email) = non_blank(self.prompt("New email (Enter to keep current): ")?) {
            customer.email = email;
        }

        writeln!(
            self.output,
            "Current phone: {}",
            customer.phone.as_deref().unwrap_or("")
        )?;
        if let Some(phone) = non_blank(self.prompt("New phone (Enter to keep current): ")?) {
            customer.phone = Some(phone);
        }

        self.service.update(id, &customer)?;
        writeln!(self.output, "\nCustomer updated successfully!")?;
        Ok(())
    }

    fn delete(&mut self) -> ActionResult<()> {
        let Some(id) = self.prompt_id("\nEnter customer ID to delete: ")? else {
            return Ok(());
        };
        let customer = self.service.get_by_id(id)?;
        let answer = self.prompt(&format!(
            "\nAre you sure you want to delete '{}'? (y/n): ",
            customer.name
        ))?;

        if answer.trim().eq_ignore_ascii_case("y") {
            self.service.delete(id)?;
            writeln!(self.output, "\nCustomer deleted successfully!")?;
        } else {
            writeln!(self.output, "\nDeletion cancelled.")?;
        }
        Ok(())
    }

    fn print_customer(&mut self, customer: &Customer) -> io::Result<()> {
        writeln!(self.output, "ID: {}", customer.id)?;
        writeln!(self.output, "Name: {}", customer.name)?;
        writeln!(self.output, "Email: {}", customer.email)?;
        writeln!(
            self.output,
            "Phone: {}",
            customer.phone.as_deref().unwrap_or("")
        )
    }

    /// Prompts for an id; prints a notice and yields `None` when it does not parse.
    fn prompt_id(&mut self, label: &str) -> ActionResult<Option<CustomerId>> {
        let raw = self.prompt(label)?;
        match raw.trim().parse::<CustomerId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid ID format.")?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, label: &str) -> ActionResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()?.ok_or(ActionError::EndOfInput)
    }

    /// Reads one line without its terminator; `None` at end of input.
    ///
    /// Invalid UTF-8 is decoded lossily so a mis-encoded terminal cannot end
    /// the session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
