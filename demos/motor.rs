//! Motor State Machine
//!
//! A motor driven by two external events, SetSpeed and Halt. Stopping is a
//! transitional state: its action resets the speed and hands off to Idle
//! through an internal event.
//!
//! Key concepts:
//! - One transition table per event, one entry per state
//! - Typed payloads: Start and ChangeSpeed require `MotorData`
//! - Guard queries callable from inside a state action
//! - Ignored events versus events that cannot happen
//!
//! Run with: RUST_LOG=statemap=debug cargo run --example motor

use statemap::builder::StateMachineBuilder;
use statemap::core::{EventData, Transition::*};
use statemap::dispatch::{Engine, StateAction, StateMachine, StepResult, TransitionError};
use statemap::{event_enum, state_enum};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum MotorState {
        Idle,
        Stop,
        Start,
        ChangeSpeed,
    }
}

event_enum! {
    enum MotorEvent {
        SetSpeed,
        Halt,
    }
}

struct MotorData {
    speed: i32,
}

impl EventData for MotorData {}

#[derive(Debug, Default)]
struct Speed {
    current: i32,
}

struct Motor {
    machine: StateMachine<MotorState, MotorEvent, Speed, MotorData>,
}

impl Motor {
    fn new() -> Result<Self, statemap::BuildError> {
        let machine = StateMachineBuilder::new(Speed::default())
            .name("motor")
            .initial(MotorState::Idle)
            .action(
                MotorState::Idle,
                StateAction::no_data(|_: &mut Speed, _| println!("Motor::Idle")),
            )
            .action(
                MotorState::Stop,
                StateAction::no_data(
                    |speed: &mut Speed, engine: &mut Engine<MotorState, MotorEvent>| {
                        println!("Motor::Stop");
                        speed.current = 0;

                        println!(
                            "  Halt allowed here? {}",
                            engine.is_allowed(MotorEvent::Halt)
                        );
                        println!(
                            "  SetSpeed allowed here? {}",
                            engine.is_allowed(MotorEvent::SetSpeed)
                        );

                        if let Err(err) = engine.internal_event(MotorState::Idle) {
                            eprintln!("  hand-off failed: {err}");
                        }
                    },
                ),
            )
            .action(
                MotorState::Start,
                StateAction::with_data(|speed: &mut Speed, _, data: &MotorData| {
                    println!("Motor::Start : speed is {}", data.speed);
                    speed.current = data.speed;
                }),
            )
            .action(
                MotorState::ChangeSpeed,
                StateAction::with_data(|speed: &mut Speed, _, data: &MotorData| {
                    println!("Motor::ChangeSpeed : speed is {}", data.speed);
                    speed.current = data.speed;
                }),
            )
            .event(
                MotorEvent::SetSpeed,
                [
                    To(MotorState::Start),       // Idle
                    CannotHappen,                // Stop
                    To(MotorState::ChangeSpeed), // Start
                    To(MotorState::ChangeSpeed), // ChangeSpeed
                ],
            )
            .event(
                MotorEvent::Halt,
                [
                    Ignored,              // Idle
                    CannotHappen,         // Stop
                    To(MotorState::Stop), // Start
                    To(MotorState::Stop), // ChangeSpeed
                ],
            )
            .build()?;

        Ok(Self { machine })
    }

    fn set_speed(&mut self, speed: i32) -> Result<StepResult<MotorState>, TransitionError> {
        self.machine
            .external_event(MotorEvent::SetSpeed, Some(MotorData { speed }))
    }

    fn halt(&mut self) -> Result<StepResult<MotorState>, TransitionError> {
        self.machine.fire(MotorEvent::Halt)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statemap=info")),
        )
        .init();

    println!("=== Motor State Machine Example ===\n");

    let mut motor = Motor::new()?;

    motor.set_speed(100)?;
    motor.set_speed(200)?;
    motor.halt()?;

    match motor.halt()? {
        StepResult::Ignored { state } => println!("Halt ignored in {state:?}"),
        StepResult::Transitioned { to, .. } => println!("Halt moved to {to:?}"),
    }

    println!("\nFinal state: {:?}", motor.machine.current_state());
    println!("Final speed: {}", motor.machine.context().current);
    println!("Path: {:?}", motor.machine.history().get_path());

    println!("\n=== Example Complete ===");
    Ok(())
}
