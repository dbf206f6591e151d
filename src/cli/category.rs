//! Category CLI commands
//!
//! Implements CLI commands for expense category management.

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::{LedgerError, LedgerResult};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories with their usage
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
    },

    /// Rename a category
    ///
    /// Expenses already recorded keep the old name.
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        new_name: String,
    },

    /// Delete an unused category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service
                .list()?
                .into_iter()
                .map(|category| {
                    let count = service.usage_count(&category)?;
                    Ok((category, count))
                })
                .collect::<LedgerResult<Vec<_>>>()?;
            println!("{}", format_category_list(&categories).trim_end());
        }

        CategoryCommands::Create { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Rename { category, new_name } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;

            let renamed = service.rename(cat.id, &new_name)?;
            println!("Renamed category '{}' to '{}'", cat.name, renamed.name);
        }

        CategoryCommands::Delete { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;

            service.delete(cat.id)?;
            println!("Deleted category: {}", cat.name);
        }
    }

    Ok(())
}
