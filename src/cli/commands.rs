use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use tracing::{info, warn};

use crate::{
    cli::args::*,
    models::{AddEntryRequest, EntryId, Priority, ValidationError},
    services::CartLedger,
    utils::{
        config::Config,
        currency::{format_currency_input, parse_currency_display},
        formatting::{format_cart_table, format_entry_detail, format_total, priority_label},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

#[derive(Clone, Copy)]
enum SessionAction {
    Add,
    Increase,
    Decrease,
    Remove,
    Show,
    Finish,
}

impl SessionAction {
    const ALL: [SessionAction; 6] = [
        SessionAction::Add,
        SessionAction::Increase,
        SessionAction::Decrease,
        SessionAction::Remove,
        SessionAction::Show,
        SessionAction::Finish,
    ];

    fn label(&self) -> &'static str {
        match self {
            SessionAction::Add => "Add product",
            SessionAction::Increase => "Increase quantity (+1)",
            SessionAction::Decrease => "Decrease quantity (-1)",
            SessionAction::Remove => "Remove product",
            SessionAction::Show => "Show cart",
            SessionAction::Finish => "Finish",
        }
    }
}

pub struct CliApp {
    config: Config,
    ledger: CartLedger,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ledger: CartLedger::new(),
        }
    }

    pub fn run(&mut self, args: Args) -> Result<()> {
        match args.command {
            Commands::Session { json } => self.handle_session(json),
            Commands::Format { input } => self.handle_format(&input),
            Commands::Parse { input } => self.handle_parse(&input),
        }
    }

    fn handle_format(&self, input: &str) -> Result<()> {
        println!("{}", format_currency_input(input));
        Ok(())
    }

    fn handle_parse(&self, input: &str) -> Result<()> {
        let value = parse_currency_display(input)
            .with_context(|| format!("'{}' is not a valid amount", input))?;
        println!("{}", value);
        Ok(())
    }

    // Session
    fn handle_session(&mut self, json: bool) -> Result<()> {
        println!("{} {}", CART, style("Shopping Cart").bold().cyan());
        info!("Cart session started");

        let theme = ColorfulTheme::default();
        let labels: Vec<&str> = SessionAction::ALL.iter().map(SessionAction::label).collect();

        loop {
            let selected = Select::with_theme(&theme)
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;

            match SessionAction::ALL[selected] {
                SessionAction::Add => self.handle_add_entry(&theme)?,
                SessionAction::Increase => self.handle_update_quantity(&theme, 1)?,
                SessionAction::Decrease => self.handle_update_quantity(&theme, -1)?,
                SessionAction::Remove => self.handle_delete_entry(&theme)?,
                SessionAction::Show => self.print_cart(),
                SessionAction::Finish => break,
            }
        }

        if json {
            let output = serde_json::to_string_pretty(&self.ledger.view())
                .context("Failed to serialize cart")?;
            println!("{}", output);
        } else {
            self.print_cart();
        }

        info!("Cart session finished with {} entries", self.ledger.len());
        Ok(())
    }

    fn handle_add_entry(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let name: String = Input::with_theme(theme)
            .with_prompt("Product name")
            .allow_empty(true)
            .interact_text()?;

        let raw_value: String = Input::with_theme(theme)
            .with_prompt("Product value (digits, in cents)")
            .allow_empty(true)
            .interact_text()?;
        let display_value = if raw_value.is_empty() {
            String::new()
        } else {
            format_currency_input(&raw_value)
        };
        if !display_value.is_empty() {
            println!("Value: {}", style(&display_value).yellow());
        }

        let mut priority_items: Vec<&str> = Priority::ALL.iter().map(priority_label).collect();
        priority_items.push("No priority");
        let default_priority = Priority::ALL
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);
        let selected = Select::with_theme(theme)
            .with_prompt("Priority")
            .items(&priority_items)
            .default(default_priority)
            .interact()?;
        let priority = Priority::ALL.get(selected).copied();

        match self
            .ledger
            .add_entry(AddEntryRequest::new(name, display_value, priority))
        {
            Ok(entry) => {
                println!("{} Product added!", CHECKMARK);
                println!("{}", format_entry_detail(&entry));
                println!("{}", format_total(&self.ledger.view()));
            }
            Err(e @ ValidationError::MissingField { .. }) => {
                println!("{} {}", WARNING, style(&e).yellow());
            }
            Err(e @ ValidationError::InvalidValue { .. }) => {
                println!("{} {}", CROSS, style(&e).red());
            }
        }

        Ok(())
    }

    fn handle_update_quantity(&mut self, theme: &ColorfulTheme, delta: i64) -> Result<()> {
        let Some(id) = self.select_entry(theme, "Which product?")? else {
            return Ok(());
        };

        match self.ledger.update_quantity(id, delta) {
            Some(quantity) => {
                println!("{} Quantity is now {}", CHECKMARK, style(quantity).cyan());
                println!("{}", format_total(&self.ledger.view()));
            }
            None => warn!("Entry {} vanished before its quantity changed", id),
        }

        Ok(())
    }

    fn handle_delete_entry(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let Some(id) = self.select_entry(theme, "Which product should be removed?")? else {
            return Ok(());
        };

        if self.config.should_confirm_delete() {
            let confirm = Confirm::with_theme(theme)
                .with_prompt("Are you sure you want to remove this product?")
                .default(false)
                .interact()?;

            if !confirm {
                println!("Removal cancelled");
                return Ok(());
            }
        }

        match self.ledger.delete_entry(id) {
            Some(entry) => {
                println!("{} Removed {}", CHECKMARK, style(&entry.name).green());
                println!("{}", format_total(&self.ledger.view()));
            }
            None => warn!("Entry {} vanished before it was removed", id),
        }

        Ok(())
    }

    fn select_entry(&self, theme: &ColorfulTheme, prompt: &str) -> Result<Option<EntryId>> {
        if self.ledger.is_empty() {
            println!("{} The cart is empty", INFO);
            return Ok(None);
        }

        let items: Vec<String> = self
            .ledger
            .entries()
            .iter()
            .map(|entry| format!("{} (x{})", entry.name, entry.quantity))
            .collect();

        let selected = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;

        Ok(self.ledger.entries().get(selected).map(|entry| entry.id))
    }

    fn print_cart(&self) {
        let view = self.ledger.view();
        if view.is_empty() {
            println!("{} The cart is empty", INFO);
        } else {
            println!("{} {}", INFO, style(format!("{} products", view.entries.len())).bold());
            println!("{}", format_cart_table(&view));
        }
        println!("{}", format_total(&view));
    }
}
