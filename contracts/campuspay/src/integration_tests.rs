//! Integration Tests
//!
//! End-to-end call sequences through a deployed program instance backed
//! by the in-memory store.

#[cfg(test)]
mod tests {
    use crate::store::{state_slot_key, MemoryStore, Program, StateStore};
    use campuspay_common::{
        constants::app,
        errors::{AmountErrorReason, CampusPayError},
        events::{CampusPayEvent, EventType},
        types::{AppId, CallResponse, CampusPayAction, PaymentRecord},
    };

    const APP: AppId = [42u8; 32];

    fn student() -> [u8; 32] {
        [2u8; 32]
    }

    fn vendor() -> [u8; 32] {
        [3u8; 32]
    }

    fn deployed() -> Program<MemoryStore> {
        let mut program = Program::new(MemoryStore::new(), APP);
        program.deploy(1).unwrap();
        program
    }

    fn register(amount: u64) -> CampusPayAction {
        CampusPayAction::RegisterTransaction { amount }
    }

    fn pay(amount: u64) -> CampusPayAction {
        CampusPayAction::PayAndLog {
            payment: PaymentRecord::new(student(), APP, amount),
        }
    }

    // ============================================================================
    // Call Scenarios
    // ============================================================================

    #[test]
    fn test_fresh_program_stats() {
        let mut program = deployed();

        let receipt = program.invoke(student(), 2, &CampusPayAction::GetStats).unwrap();

        assert_eq!(receipt.response, CallResponse::Stats(0, 0));
        assert!(receipt.events.is_empty());
    }

    #[test]
    fn test_single_registration() {
        let mut program = deployed();

        let receipt = program.invoke(student(), 2, &register(100)).unwrap();

        assert_eq!(receipt.response, CallResponse::TransactionCount(1));
        assert_eq!(program.stats(), Ok((1, 100)));
    }

    #[test]
    fn test_two_registrations_accumulate() {
        let mut program = deployed();

        program.invoke(student(), 2, &register(50)).unwrap();
        let receipt = program.invoke(vendor(), 3, &register(25)).unwrap();

        assert_eq!(receipt.response, CallResponse::TransactionCount(2));
        assert_eq!(program.stats(), Ok((2, 75)));
    }

    #[test]
    fn test_payment_logged() {
        let mut program = deployed();

        let receipt = program.invoke(student(), 2, &pay(10)).unwrap();

        assert_eq!(
            receipt.response,
            CallResponse::Confirmation(String::from("Transaction of 10 sats logged successfully."))
        );
        assert_eq!(program.stats(), Ok((1, 10)));
        assert_eq!(
            receipt.events,
            vec![CampusPayEvent::PaymentLogged {
                sender: student(),
                receiver: APP,
                amount: 10,
                total_transactions: 1,
                total_volume: 10,
                block_height: 2,
            }]
        );
    }

    #[test]
    fn test_zero_payment_rejected_without_effect() {
        let mut program = deployed();
        let before = program.store().clone();

        let result = program.invoke(student(), 2, &pay(0));

        assert_eq!(
            result,
            Err(CampusPayError::InvalidAmount {
                amount: 0,
                reason: AmountErrorReason::Zero,
            })
        );
        assert_eq!(program.stats(), Ok((0, 0)));
        let slot = state_slot_key(&APP);
        assert_eq!(program.store().load(&slot), before.load(&slot));
    }

    #[test]
    fn test_greet_does_not_touch_state() {
        let mut program = deployed();
        program.invoke(student(), 2, &register(30)).unwrap();

        let receipt = program.invoke(vendor(), 3, &CampusPayAction::Greet).unwrap();

        assert_eq!(receipt.response.as_str(), Some(app::GREETING));
        assert!(receipt.events.is_empty());
        assert_eq!(program.stats(), Ok((1, 30)));
    }

    // ============================================================================
    // Invariants
    // ============================================================================

    #[test]
    fn test_counters_track_successful_calls() {
        let mut program = deployed();
        let amounts = [5u64, 0, 120, 7, 0, 1_000, 33];

        let mut expected_count = 0u64;
        let mut expected_volume = 0u64;

        for (i, amount) in amounts.iter().enumerate() {
            let action = if i % 2 == 0 { register(*amount) } else { pay(*amount) };
            let before = program.stats().unwrap();

            match program.invoke(student(), 10 + i as u64, &action) {
                Ok(_) => {
                    expected_count += 1;
                    expected_volume += amount;
                }
                Err(err) => {
                    assert_eq!(err.code(), "E010_INVALID_AMOUNT");
                    assert_eq!(program.stats().unwrap(), before);
                }
            }

            let (count, volume) = program.stats().unwrap();
            assert_eq!(count, expected_count);
            assert_eq!(volume, expected_volume);
            assert!(count >= before.0 && volume >= before.1, "counters never decrease");
        }

        assert_eq!(program.stats(), Ok((5, 1_165)));
    }

    #[test]
    fn test_counters_move_together() {
        let mut program = deployed();

        for amount in [1u64, 2, 3, 4] {
            let (count_before, volume_before) = program.stats().unwrap();
            program.invoke(student(), 5, &pay(amount)).unwrap();
            let (count_after, volume_after) = program.stats().unwrap();

            assert_eq!(count_after - count_before, 1);
            assert_eq!(volume_after - volume_before, amount);
        }
    }

    #[test]
    fn test_repeated_reads_identical() {
        let mut program = deployed();
        program.invoke(student(), 2, &register(64)).unwrap();

        let first = program.invoke(vendor(), 3, &CampusPayAction::GetStats).unwrap();
        let second = program.invoke(vendor(), 4, &CampusPayAction::GetStats).unwrap();

        assert_eq!(first.response, second.response);
        assert_eq!(first.response, CallResponse::Stats(1, 64));
    }

    #[test]
    fn test_volume_overflow_rejected() {
        let mut program = deployed();
        program.invoke(student(), 2, &register(u64::MAX - 1)).unwrap();

        let result = program.invoke(student(), 3, &pay(2));

        assert_eq!(result, Err(CampusPayError::Overflow));
        assert_eq!(program.stats(), Ok((1, u64::MAX - 1)));
    }

    #[test]
    fn test_event_stream_over_session() {
        let mut program = deployed();
        let mut all_events = Vec::new();

        for action in [register(10), CampusPayAction::GetStats, pay(20), pay(0), register(5)] {
            if let Ok(receipt) = program.invoke(student(), 7, &action) {
                all_events.extend(receipt.events);
            }
        }

        let payments: Vec<_> = all_events
            .iter()
            .filter(|e| e.event_type() == EventType::PaymentLogged)
            .collect();
        assert_eq!(all_events.len(), 3);
        assert_eq!(payments.len(), 1);
        assert_eq!(all_events.iter().map(|e| e.amount()).sum::<u64>(), 35);
    }
}
