//! # Integration Test Flows
//!
//! End-to-end scenarios across the insider directory (1), the coordinator
//! (2), the policy modules (3) and the ledger (4).
//!
//! ## Flows Tested
//!
//! 1. **Issuance gating**: mint succeeds only for recipients the
//!    accreditation rule accepts, insiders included once exempt.
//! 2. **Conjunction**: a transfer the accreditation rule accepts still fails
//!    while the vesting lock rejects it.
//! 3. **Vesting cliff**: locked tokens move exactly at `start + duration`.
//! 4. **Permit relay**: a signed approval submitted by a third party, spent
//!    through `transfer_from`, never replayable.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;

    use crate::fixtures::*;
    use rt_01_insider_directory::prelude::{InsiderLookup, InsiderType};
    use rt_02_compliance::prelude::{ComplianceError, ComplianceEvent, ModuleCall};
    use rt_03_policy_modules::prelude::{AccreditationConfig, AttributeKey, VestingConfig};
    use rt_04_ledger::prelude::{LedgerError, LedgerEvent, PermitMessage};
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{Address, ErrorCategory, U256};

    fn amount(n: u64) -> U256 {
        U256::from(n)
    }

    fn deploy() -> Deployment {
        rt_telemetry::init_test_tracing();
        Deployment::new().expect("deployment wires")
    }

    fn set_exempt(d: &Deployment, exempt: bool) {
        d.coordinator
            .call_module_function(
                &ctx(OWNER),
                &ModuleCall::new("set_insiders_exempt", json!({ "exempt": exempt })),
                ACCREDITATION,
            )
            .expect("exemption toggles");
    }

    // =============================================================================
    // ISSUANCE GATING
    // =============================================================================

    /// H accredited, N not: H can receive, N only once registered as an
    /// exempt insider.
    #[test]
    fn test_mint_scenario() {
        let mut d = deploy();
        let holder = investor(1);
        let newcomer = investor(2);
        d.accredit(holder);

        d.ledger.mint(&ctx(AGENT), holder, amount(1000)).unwrap();
        assert_eq!(d.ledger.balance_of(holder), amount(1000));

        assert_eq!(
            d.ledger.mint(&ctx(AGENT), newcomer, amount(1)),
            Err(LedgerError::TransferNotPermitted)
        );

        d.directory
            .add_insider(&ctx(AGENT), newcomer, InsiderType::Employee)
            .unwrap();
        // registered but exemption still off
        assert!(d.ledger.mint(&ctx(AGENT), newcomer, amount(1)).is_err());

        set_exempt(&d, true);
        d.ledger.mint(&ctx(AGENT), newcomer, amount(1)).unwrap();
        assert_eq!(d.ledger.total_supply(), amount(1001));
    }

    #[test]
    fn test_exemption_toggle_flips_verdict() {
        let d = deploy();
        let insider = investor(3);
        d.directory
            .add_insider(&ctx(AGENT), insider, InsiderType::Founder)
            .unwrap();

        let verdict = |d: &Deployment| {
            d.coordinator
                .can_transfer(Address::ZERO, insider, amount(5), &d.ledger, GENESIS)
                .unwrap()
        };
        assert!(!verdict(&d));
        set_exempt(&d, true);
        assert!(verdict(&d));
        d.directory.remove_insider(&ctx(AGENT), insider).unwrap();
        assert!(!verdict(&d));
        assert!(!d.directory.is_insider(insider));
    }

    #[test]
    fn test_exemption_configured_at_deployment() {
        let d = Deployment::with_config(
            VestingConfig::default(),
            AccreditationConfig {
                insiders_exempt: true,
                ..AccreditationConfig::default()
            },
        )
        .unwrap();
        d.directory
            .add_insider(&ctx(AGENT), investor(4), InsiderType::Director)
            .unwrap();
        assert!(d
            .coordinator
            .can_transfer(Address::ZERO, investor(4), amount(1), &d.ledger, GENESIS)
            .unwrap());
    }

    #[test]
    fn test_sender_is_never_checked_for_accreditation() {
        let mut d = deploy();
        let holder = investor(1);
        let buyer = investor(2);
        d.accredit(holder);
        d.accredit(buyer);
        d.ledger.mint(&ctx(AGENT), holder, amount(10)).unwrap();

        assert!(d.registry.revoke(holder, AttributeKey::accredited_investor()));
        d.ledger.transfer(&ctx(holder), buyer, amount(10)).unwrap();
        assert_eq!(d.ledger.balance_of(buyer), amount(10));
    }

    #[test]
    fn test_oracle_outage_is_a_hard_error() {
        let mut d = deploy();
        d.registry.set_available(false);
        let err = d
            .ledger
            .mint(&ctx(AGENT), investor(1), amount(1))
            .unwrap_err();
        match err {
            LedgerError::Compliance(ComplianceError::Policy { module, .. }) => {
                assert_eq!(module, "accreditation");
            }
            other => panic!("expected policy error, got {other:?}"),
        }
        assert_eq!(d.ledger.total_supply(), U256::zero());
    }

    #[test]
    fn test_removed_module_stops_gating() {
        let mut d = deploy();
        assert!(d.ledger.mint(&ctx(AGENT), investor(9), amount(1)).is_err());

        d.coordinator
            .remove_module(&ctx(OWNER), ACCREDITATION)
            .unwrap();
        assert!(!d.coordinator.is_module_bound(ACCREDITATION));
        d.ledger.mint(&ctx(AGENT), investor(9), amount(1)).unwrap();
    }

    #[test]
    fn test_forced_transfer_is_still_gated() {
        let mut d = deploy();
        let holder = investor(1);
        d.accredit(holder);
        d.ledger.mint(&ctx(AGENT), holder, amount(50)).unwrap();

        assert_eq!(
            d.ledger
                .forced_transfer(&ctx(AGENT), holder, investor(2), amount(10)),
            Err(LedgerError::TransferNotPermitted)
        );
        assert_eq!(
            LedgerError::TransferNotPermitted.category(),
            ErrorCategory::AuthorizationDenied
        );
    }

    // =============================================================================
    // CONJUNCTION & VESTING
    // =============================================================================

    #[test]
    fn test_conjunction_vesting_blocks_accredited_transfer() {
        let mut d = deploy();
        let holder = investor(1);
        let buyer = investor(2);
        d.accredit(holder);
        d.accredit(buyer);
        d.ledger.mint(&ctx(AGENT), holder, amount(1000)).unwrap();
        d.vesting
            .add_schedule(&ctx(OWNER), COORDINATOR, holder, amount(600), "founders")
            .unwrap();

        assert_eq!(
            d.ledger.transfer(&ctx(holder), buyer, amount(401)),
            Err(LedgerError::TransferNotPermitted)
        );
        d.ledger.transfer(&ctx(holder), buyer, amount(400)).unwrap();
        assert_eq!(d.ledger.balance_of(holder), amount(600));
        assert_eq!(
            d.vesting.locked_balance(COORDINATOR, holder, GENESIS),
            amount(600)
        );
    }

    #[test]
    fn test_vesting_cliff() {
        let duration = 30 * DAY;
        let mut d = Deployment::with_config(
            VestingConfig {
                default_duration_secs: duration,
            },
            AccreditationConfig::default(),
        )
        .unwrap();
        let holder = investor(1);
        let buyer = investor(2);
        d.accredit(holder);
        d.accredit(buyer);
        d.ledger.mint(&ctx(AGENT), holder, amount(100)).unwrap();

        d.coordinator
            .call_module_function(
                &ctx(OWNER),
                &ModuleCall::new(
                    "add_schedule",
                    json!({ "holder": holder, "amount": amount(100), "name": "seed" }),
                ),
                VESTING,
            )
            .unwrap();
        let schedule = d.vesting.schedule(COORDINATOR, holder, "seed").unwrap();
        assert_eq!(schedule.unlock_time(), GENESIS + duration);

        for now in [GENESIS, GENESIS + DAY, GENESIS + duration - 1] {
            assert_eq!(
                d.ledger.transfer(&ctx_at(holder, now), buyer, amount(1)),
                Err(LedgerError::TransferNotPermitted),
                "locked at {now}"
            );
        }
        d.ledger
            .transfer(&ctx_at(holder, GENESIS + duration), buyer, amount(100))
            .unwrap();
        assert_eq!(d.ledger.balance_of(buyer), amount(100));
    }

    #[test]
    fn test_burn_of_locked_tokens_is_rejected() {
        let mut d = deploy();
        let holder = investor(1);
        d.accredit(holder);
        d.ledger.mint(&ctx(AGENT), holder, amount(100)).unwrap();
        d.vesting
            .add_schedule(&ctx(OWNER), COORDINATOR, holder, amount(70), "lock")
            .unwrap();

        assert_eq!(
            d.ledger.burn(&ctx(AGENT), holder, amount(31)),
            Err(LedgerError::TransferNotPermitted)
        );
        d.ledger.burn(&ctx(AGENT), holder, amount(30)).unwrap();

        d.vesting
            .remove_schedule(&ctx(OWNER), COORDINATOR, holder, "lock")
            .unwrap();
        d.ledger.burn(&ctx(AGENT), holder, amount(70)).unwrap();
        assert_eq!(d.ledger.total_supply(), U256::zero());
    }

    #[test]
    fn test_vesting_requires_initialized_coordinator() {
        let d = deploy();
        let other = Address::from_low_u64(0xBAD);
        let err = d
            .vesting
            .add_schedule(&ctx(OWNER), other, investor(1), amount(1), "x")
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::BindingError);
    }

    // =============================================================================
    // PERMIT RELAY
    // =============================================================================

    #[test]
    fn test_permit_relay_and_replay() {
        let mut d = deploy();
        let key = Secp256k1KeyPair::from_bytes([0x42; 32]).unwrap();
        let holder = Address::new(key.address());
        let spender = investor(5);
        let buyer = investor(6);
        let relayer = investor(7);
        d.accredit(holder);
        d.accredit(buyer);
        d.ledger.mint(&ctx(AGENT), holder, amount(100)).unwrap();

        let message = PermitMessage {
            owner: holder,
            spender,
            value: amount(60),
            nonce: d.ledger.nonce_of(holder),
            deadline: GENESIS + DAY,
        };
        let digest = message.digest(&d.ledger.domain_separator(CHAIN_ID));
        let signature = key.sign_prehash(digest.as_bytes()).unwrap().to_bytes();

        d.ledger
            .authorize(&ctx(relayer), holder, spender, amount(60), GENESIS + DAY, &signature)
            .unwrap();
        assert_eq!(d.ledger.nonce_of(holder), U256::one());

        d.ledger
            .transfer_from(&ctx(spender), holder, buyer, amount(60))
            .unwrap();
        assert_eq!(d.ledger.allowance(holder, spender), U256::zero());
        assert_eq!(d.ledger.balance_of(buyer), amount(60));

        assert_eq!(
            d.ledger.authorize(
                &ctx(relayer),
                holder,
                spender,
                amount(60),
                GENESIS + DAY,
                &signature
            ),
            Err(LedgerError::InvalidSigner)
        );
        assert_eq!(d.ledger.nonce_of(holder), U256::one());
    }

    #[test]
    fn test_permit_ignores_compliance() {
        let mut d = deploy();
        let key = Secp256k1KeyPair::from_bytes([0x43; 32]).unwrap();
        let holder = Address::new(key.address());
        // neither party accredited
        let message = PermitMessage {
            owner: holder,
            spender: investor(8),
            value: amount(1),
            nonce: U256::zero(),
            deadline: GENESIS,
        };
        let digest = message.digest(&d.ledger.domain_separator(CHAIN_ID));
        let signature = key.sign_prehash(digest.as_bytes()).unwrap().to_bytes();
        d.ledger
            .authorize(&ctx(holder), holder, investor(8), amount(1), GENESIS, &signature)
            .unwrap();
        assert_eq!(d.ledger.allowance(holder, investor(8)), amount(1));
    }

    // =============================================================================
    // WIRING & EVENTS
    // =============================================================================

    #[test]
    fn test_deployment_events() {
        let d = deploy();
        let events = d.coordinator.events();
        assert!(events.contains(&ComplianceEvent::ModuleAdded {
            module: ACCREDITATION
        }));
        assert!(events.contains(&ComplianceEvent::ModuleAdded { module: VESTING }));
        assert!(events.contains(&ComplianceEvent::TokenBound { token: LEDGER }));
        assert_eq!(d.coordinator.modules(), vec![ACCREDITATION, VESTING]);
        assert_eq!(d.coordinator.token_bound(), Some(LEDGER));
    }

    #[test]
    fn test_ledger_emits_transfer_events_for_supply_changes() {
        let mut d = deploy();
        let holder = investor(1);
        d.accredit(holder);
        d.ledger.mint(&ctx(AGENT), holder, amount(5)).unwrap();
        d.ledger.burn(&ctx(AGENT), holder, amount(2)).unwrap();
        assert_eq!(
            d.ledger.drain_events(),
            vec![
                LedgerEvent::Transfer {
                    from: Address::ZERO,
                    to: holder,
                    value: amount(5)
                },
                LedgerEvent::Transfer {
                    from: holder,
                    to: Address::ZERO,
                    value: amount(2)
                },
            ]
        );
    }

    #[test]
    fn test_unbound_caller_cannot_notify() {
        let d = deploy();
        let err = d
            .coordinator
            .transferred(&ctx(OWNER), investor(1), investor(2), amount(1), &d.ledger)
            .unwrap_err();
        assert_eq!(err, ComplianceError::OnlyBoundToken(OWNER));
        assert_eq!(err.category(), ErrorCategory::BindingError);
    }

    #[test]
    fn test_ledger_moves_to_new_coordinator() {
        let mut d = deploy();
        let replacement = Arc::new(rt_02_compliance::prelude::ComplianceCoordinator::new(
            Address::from_low_u64(0xC1),
            OWNER,
            Default::default(),
        ));
        d.ledger
            .set_compliance(&ctx(OWNER), replacement.clone())
            .unwrap();
        assert_eq!(d.coordinator.token_bound(), None);
        assert_eq!(replacement.token_bound(), Some(LEDGER));

        // empty coordinator: fail-open
        d.ledger.mint(&ctx(AGENT), investor(9), amount(3)).unwrap();
        assert_eq!(d.ledger.balance_of(investor(9)), amount(3));
    }
}
