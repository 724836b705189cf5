use anyhow::Result;
use dialoguer::Input;
use eventdesk_core::EventApi;
use owo_colors::OwoColorize;

use crate::controller::EventController;
use crate::utils::tui::create_spinner;
use crate::view::{HELP, Intent, Notice};

/// Interactive table editor. Each line is handled to completion before
/// the next one is read.
pub async fn run<A: EventApi>(mut controller: EventController<A>) -> Result<()> {
    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());

    let spinner = create_spinner("Loading events...");
    controller.init().await;
    spinner.finish_and_clear();
    draw(&mut controller)?;

    loop {
        let line: String = Input::new()
            .with_prompt("eventdesk")
            .allow_empty(true)
            .interact_text()?;

        match controller.view().interpret(&line) {
            Ok(Intent::Quit) => break,
            Ok(Intent::Nothing) => continue,
            Ok(Intent::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(Intent::Refresh) => {
                let spinner = create_spinner("Reloading...");
                controller.refresh().await;
                spinner.finish_and_clear();
            }
            Ok(Intent::SetField { id, field, value }) => {
                if let Err(err) = controller.view_mut().set_field(&id, field, &value) {
                    eprintln!("  {}", err.to_string().red());
                    continue;
                }
            }
            Ok(Intent::Action(action)) => {
                if action.is_remote() {
                    let spinner = create_spinner("Working...");
                    controller.dispatch(action).await;
                    spinner.finish_and_clear();
                } else {
                    controller.dispatch(action).await;
                }
            }
            Err(err) => {
                eprintln!("  {}", err.to_string().red());
                continue;
            }
        }

        draw(&mut controller)?;
    }

    Ok(())
}

/// Print the table, then any notices. Alerts block until acknowledged.
fn draw<A: EventApi>(controller: &mut EventController<A>) -> Result<()> {
    println!();
    println!("{}", controller.view().table());
    println!(
        "{}",
        format!("{} event(s)", controller.store().len()).dimmed()
    );

    for notice in controller.view_mut().take_notices() {
        match notice {
            Notice::Info(message) => println!("  {}", message.green()),
            Notice::Error(message) => eprintln!("  {}", message.red()),
            Notice::Alert(message) => {
                eprintln!("  {}", message.red().bold());
                let _: String = Input::new()
                    .with_prompt("  Press Enter to continue")
                    .allow_empty(true)
                    .show_default(false)
                    .interact_text()?;
            }
        }
    }

    Ok(())
}
