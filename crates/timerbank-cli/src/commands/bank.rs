use clap::Subcommand;
use timerbank_core::{format_hms, parse_hms, BalanceSnapshot, TimeBank};

#[derive(Subcommand)]
pub enum BankAction {
    /// Print the current balance as HH:MM:SS
    Balance,
    /// Add time to the balance (SS, MM:SS, or HH:MM:SS)
    Deposit {
        /// Amount to add
        duration: String,
    },
    /// Remove time from the balance
    Withdraw {
        /// Amount to remove
        duration: String,
    },
    /// Overwrite the balance
    Set {
        /// New balance
        duration: String,
    },
}

pub fn run(action: BankAction) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = BalanceSnapshot::default_location()?;
    let mut bank = TimeBank::with_balance(snapshot.load());

    match action {
        BankAction::Balance => {
            println!("{}", bank.formatted());
        }
        BankAction::Deposit { duration } => {
            let seconds = parse_hms(&duration)?;
            bank.deposit(seconds);
            snapshot.save(bank.balance())?;
            println!("{}", bank.formatted());
        }
        BankAction::Withdraw { duration } => {
            let seconds = parse_hms(&duration)?;
            if let Err(err) = bank.withdraw(seconds) {
                eprintln!("{err} (balance {})", format_hms(bank.balance()));
                std::process::exit(1);
            }
            snapshot.save(bank.balance())?;
            println!("{}", bank.formatted());
        }
        BankAction::Set { duration } => {
            let seconds = parse_hms(&duration)?;
            bank.set_balance(seconds);
            snapshot.save(bank.balance())?;
            println!("{}", bank.formatted());
        }
    }
    Ok(())
}
