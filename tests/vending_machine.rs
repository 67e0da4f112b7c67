//! End-to-end vending machine: coins in, soda out, change dispensed one
//! coin per clock tick.

use statecraft::builder::{Registry, RegistryError};
use statecraft::core::Catalog;
use statecraft::dispatch::{Dispatcher, Session};
use statecraft::fsm_enum;
use statecraft::validation::audit;

const SODA_PRICE: u32 = 50;
const COINS: [u32; 4] = [25, 10, 5, 1];

fsm_enum! {
    enum Vending: State {
        Idle => "idle",
        GetMoney { money_inserted: u32 } => "get-money",
        Vend { change_remaining: u32 } => "vend",
        DispenseChange { change_remaining: u32 } => "dispense-change",
    }
}

fsm_enum! {
    enum Input: Action {
        InsertMoney { money: u32 } => "insert-money",
        VendSoda => "vend-soda",
        ClockTick => "clock-tick",
    }
}

fn declared() -> Registry<Vending, Input> {
    let mut registry: Registry<Vending, Input> = Registry::new();
    registry
        .declare_states(Vending::catalog())
        .unwrap()
        .declare_transitions([
            ("idle", "get-money"),
            ("get-money", "get-money"),
            ("get-money", "vend"),
            ("vend", "dispense-change"),
            ("dispense-change", "dispense-change"),
            ("dispense-change", "idle"),
        ])
        .unwrap()
        .declare_actions(Input::catalog())
        .unwrap();
    registry
}

fn register_handlers(registry: &mut Registry<Vending, Input>) -> Result<(), RegistryError> {
    registry
        .register_handler("idle", "insert-money", ["get-money"], |_, input| {
            match input {
                Input::InsertMoney { money } => Vending::GetMoney {
                    money_inserted: *money,
                },
                _ => Vending::GetMoney { money_inserted: 0 },
            }
        })?
        .register_handler("get-money", "insert-money", ["get-money"], |state, input| {
            match (state, input) {
                (Vending::GetMoney { money_inserted }, Input::InsertMoney { money }) => {
                    Vending::GetMoney {
                        money_inserted: money_inserted.saturating_add(*money),
                    }
                }
                _ => state.clone(),
            }
        })?
        .register_handler("get-money", "vend-soda", ["get-money", "vend"], |state, _| {
            match state {
                Vending::GetMoney { money_inserted } if *money_inserted >= SODA_PRICE => {
                    Vending::Vend {
                        change_remaining: money_inserted - SODA_PRICE,
                    }
                }
                _ => state.clone(),
            }
        })?
        .register_handler("vend", "clock-tick", ["dispense-change"], |state, _| {
            let change_remaining = match state {
                Vending::Vend { change_remaining } => *change_remaining,
                _ => 0,
            };
            Vending::DispenseChange { change_remaining }
        })?
        .register_handler(
            "dispense-change",
            "clock-tick",
            ["dispense-change", "idle"],
            |state, _| match state {
                Vending::DispenseChange { change_remaining } if *change_remaining > 0 => {
                    let coin = COINS
                        .into_iter()
                        .find(|coin| coin <= change_remaining)
                        .unwrap_or(*change_remaining);
                    Vending::DispenseChange {
                        change_remaining: change_remaining - coin,
                    }
                }
                _ => Vending::Idle,
            },
        )?;
    Ok(())
}

fn dispatcher() -> Dispatcher<Vending, Input> {
    let mut registry = declared();
    register_handlers(&mut registry).unwrap();
    registry.finalize().unwrap().dispatcher()
}

#[test]
fn buys_a_soda_and_dispenses_change() {
    let dispatcher = dispatcher();
    let mut state = Vending::Idle;

    state = dispatcher.next_state(&state, &Input::ClockTick);
    assert_eq!(state, Vending::Idle);

    state = dispatcher.next_state(&state, &Input::InsertMoney { money: 25 });
    assert_eq!(state, Vending::GetMoney { money_inserted: 25 });

    state = dispatcher.next_state(&state, &Input::InsertMoney { money: 52 });
    assert_eq!(state, Vending::GetMoney { money_inserted: 77 });

    state = dispatcher.next_state(&state, &Input::VendSoda);
    assert_eq!(state, Vending::Vend { change_remaining: 27 });

    state = dispatcher.next_state(&state, &Input::ClockTick);
    assert_eq!(state, Vending::DispenseChange { change_remaining: 27 });

    let mut remaining = Vec::new();
    while let Vending::DispenseChange { change_remaining } = state {
        remaining.push(change_remaining);
        state = dispatcher.next_state(&state, &Input::ClockTick);
    }

    assert_eq!(remaining, vec![27, 2, 1, 0]);
    assert_eq!(state, Vending::Idle);
}

#[test]
fn vend_without_enough_money_stays_in_get_money() {
    let dispatcher = dispatcher();
    let state = Vending::GetMoney { money_inserted: 30 };

    assert_eq!(dispatcher.next_state(&state, &Input::VendSoda), state);
}

#[test]
fn huge_deposits_saturate_instead_of_overflowing() {
    let dispatcher = dispatcher();
    let mut state = Vending::GetMoney { money_inserted: 60 };

    state = dispatcher.next_state(&state, &Input::InsertMoney { money: u32::MAX });
    assert_eq!(state, Vending::GetMoney { money_inserted: u32::MAX });

    state = dispatcher.next_state(&state, &Input::VendSoda);
    assert_eq!(
        state,
        Vending::Vend {
            change_remaining: u32::MAX - SODA_PRICE
        }
    );
}

#[test]
fn inputs_without_handlers_are_ignored() {
    let dispatcher = dispatcher();

    let vend = Vending::Vend { change_remaining: 5 };
    assert_eq!(dispatcher.next_state(&vend, &Input::InsertMoney { money: 5 }), vend);
    assert_eq!(dispatcher.next_state(&Vending::Idle, &Input::VendSoda), Vending::Idle);
}

#[test]
fn greedy_change_uses_largest_coins_first() {
    let dispatcher = dispatcher();
    let mut state = Vending::DispenseChange { change_remaining: 41 };
    let mut remaining = Vec::new();

    while let Vending::DispenseChange { change_remaining } = state {
        remaining.push(change_remaining);
        state = dispatcher.next_state(&state, &Input::ClockTick);
    }

    assert_eq!(remaining, vec![41, 16, 6, 1, 0]);
}

#[test]
fn session_tracks_the_purchase() {
    let mut session = Session::new(dispatcher(), Vending::Idle);

    session
        .apply_all(&[
            Input::ClockTick,
            Input::InsertMoney { money: 50 },
            Input::VendSoda,
            Input::ClockTick,
            Input::ClockTick,
        ])
        .unwrap();

    assert_eq!(session.current_state(), &Vending::Idle);
    assert_eq!(
        session.history().actions(),
        vec!["insert-money", "vend-soda", "clock-tick", "clock-tick"]
    );
}

#[test]
fn finalize_requires_every_non_terminal_state_handled() {
    let mut registry = declared();
    registry
        .register_handler("idle", "insert-money", ["get-money"], |_, _| {
            Vending::GetMoney { money_inserted: 0 }
        })
        .unwrap();

    assert_eq!(
        registry.finalize().unwrap_err(),
        RegistryError::IncompleteHandlers {
            states: vec![
                "dispense-change".to_string(),
                "get-money".to_string(),
                "vend".to_string(),
            ],
        }
    );
}

#[test]
fn vend_cannot_jump_straight_to_idle() {
    let mut registry = declared();

    let result = registry.register_handler("vend", "clock-tick", ["idle"], |_, _| Vending::Idle);
    assert!(matches!(
        result,
        Err(RegistryError::UndeclaredReturn { state, destination, .. })
            if state == "vend" && destination == "idle"
    ));
}

#[test]
fn finalized_schema_passes_audit() {
    let dispatcher = dispatcher();
    let schema = dispatcher.definition().schema();

    assert!(audit(schema).is_success());
    assert_eq!(
        schema.states["get-money"].shape.fields()[0].name,
        "money_inserted"
    );

    let json = schema.to_json().unwrap();
    let parsed = statecraft::core::Schema::from_json(&json).unwrap();
    assert_eq!(&parsed, schema);
}
