//! Interactive terminal front-end for the wizard.
//!
//! Presentation only: renders state snapshots, forwards field input and
//! navigation intents to the controller, and consumes coordinator events.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::WizardConfig;
use crate::error::Result;
use crate::store::KvStore;
use crate::wizard::{
    schema, AdvanceOutcome, FieldId, IntakeClient, NotificationChannel, ProgressStore,
    RestoreAction, SubmissionCoordinator, SubmitEvent, WizardController, WizardStep,
    CAREER_GOAL_OTHER,
};

type InputLines = Lines<BufReader<Stdin>>;

/// Run the wizard against stdin/stdout until submission or EOF.
pub async fn run_wizard(config: WizardConfig, store: Arc<dyn KvStore>) -> Result<()> {
    let progress = ProgressStore::new(store);
    let (controller, action) = WizardController::bootstrap(progress).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let RestoreAction::ConfirmRequired(step) = action {
        if !handle_restore_prompt(&controller, &mut lines, step).await? {
            return Ok(()); // EOF during the prompt
        }
    }

    let intake = IntakeClient::new(config.intake_url.clone());
    let (coordinator, mut events) = SubmissionCoordinator::new(
        intake,
        config.redirect_location.clone(),
        config.redirect_delay,
    );

    loop {
        let step = controller.current_step().await;
        match step {
            WizardStep::Welcome => {
                println!("\nWelcome to Job Club! This short form gets you set up.");
                println!("(Press Enter to begin, type 'quit' to leave — progress is saved.)");
                match read_line(&mut lines).await {
                    Some(input) if input == "quit" => return Ok(()),
                    Some(_) => {
                        controller.advance().await;
                    }
                    None => return Ok(()),
                }
            }
            WizardStep::Profile | WizardStep::CareerGoal | WizardStep::Links => {
                match fill_step_fields(&controller, &mut lines, step).await? {
                    StepControl::Continue => match controller.advance().await {
                        AdvanceOutcome::Advanced(_) => {}
                        AdvanceOutcome::Rejected { validation } => {
                            if let Some(message) = validation.primary_message() {
                                println!("✋ {message}");
                            }
                        }
                        AdvanceOutcome::AtFinalStep => {}
                    },
                    StepControl::Back => {
                        controller.retreat().await;
                    }
                    StepControl::Quit => return Ok(()),
                }
            }
            WizardStep::Community => {
                println!("\nLast step — what should we keep you posted about?");
                for (label, channel) in [
                    ("Events", NotificationChannel::Events),
                    ("Workshops", NotificationChannel::Workshops),
                    ("Mentoring", NotificationChannel::Mentoring),
                ] {
                    print!("{label}? [y/N] ");
                    let Some(input) = read_line(&mut lines).await else {
                        return Ok(());
                    };
                    controller
                        .set_notification(channel, input.eq_ignore_ascii_case("y"))
                        .await;
                }

                print!("Submit your profile now? [Y/n] ");
                match read_line(&mut lines).await {
                    Some(input) if input.eq_ignore_ascii_case("n") => {
                        controller.retreat().await;
                        continue;
                    }
                    Some(_) => {}
                    None => return Ok(()),
                }

                coordinator.complete(&controller).await?;
                while let Some(event) = events.recv().await {
                    match event {
                        SubmitEvent::Accepted => {
                            println!("🎉 Profile submitted successfully! Welcome to Job Club.");
                            println!("   Check your email for next steps!");
                        }
                        SubmitEvent::Redirect { location } => {
                            println!("Continuing to {location}");
                            return Ok(());
                        }
                    }
                }
                return Ok(());
            }
        }
    }
}

enum StepControl {
    Continue,
    Back,
    Quit,
}

/// Prompt for every field of a step. Empty input keeps the current value;
/// 'back' retreats, 'quit' leaves with progress saved.
async fn fill_step_fields(
    controller: &WizardController,
    lines: &mut InputLines,
    step: WizardStep,
) -> Result<StepControl> {
    println!("\n── Step {} of {} ──", step.number(), WizardStep::COUNT);
    for spec in schema::fields_for_step(step) {
        // The free-text goal only applies while the selector is on `other`.
        if spec.id == FieldId::OtherCareerGoal
            && controller.snapshot().await.fields.career_goal.trim() != CAREER_GOAL_OTHER
        {
            continue;
        }

        let current = controller.snapshot().await.fields.get(spec.id).to_string();
        if current.is_empty() {
            print!("{}: ", spec.label);
        } else {
            print!("{} [{current}]: ", spec.label);
        }

        let Some(input) = read_line(lines).await else {
            return Ok(StepControl::Quit);
        };
        match input.as_str() {
            "back" => return Ok(StepControl::Back),
            "quit" => return Ok(StepControl::Quit),
            "" => {}
            value => controller.set_field(spec.id, value).await,
        }
    }
    Ok(StepControl::Continue)
}

/// Two-choice restore prompt. Returns false on EOF.
async fn handle_restore_prompt(
    controller: &WizardController,
    lines: &mut InputLines,
    step: WizardStep,
) -> Result<bool> {
    println!(
        "Found a saved session on step {} of {}.",
        step.number(),
        WizardStep::COUNT
    );
    loop {
        print!("Resume where you left off? [y/n] ");
        let Some(input) = read_line(lines).await else {
            return Ok(false);
        };
        if input.eq_ignore_ascii_case("y") {
            controller.resume_saved().await?;
            return Ok(true);
        }
        if input.eq_ignore_ascii_case("n") {
            controller.discard_saved().await?;
            return Ok(true);
        }
    }
}

/// Read one trimmed line; None on EOF or read error.
async fn read_line(lines: &mut InputLines) -> Option<String> {
    use std::io::Write;
    // Prompts above use print!; make sure they reach the terminal.
    let _ = std::io::stdout().flush();
    match lines.next_line().await {
        Ok(Some(line)) => Some(line.trim().to_string()),
        Ok(None) => None,
        Err(e) => {
            tracing::error!("Error reading stdin: {e}");
            None
        }
    }
}
