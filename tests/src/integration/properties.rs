//! # Ledger Properties
//!
//! Random operation sequences against a ledger, checking after every step:
//!
//! - **Conservation**: Σ balances == total supply.
//! - **Frozen invariant**: frozen amount ≤ balance for every holder.
//! - **Atomicity**: a failed operation leaves the state untouched.
//! - **Gating**: with a rejecting module nothing ever changes balances.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use rt_02_compliance::prelude::{ComplianceCoordinator, CoordinatorConfig, FixedVerdictModule};
    use rt_04_ledger::prelude::{LedgerConfig, LedgerError, LedgerState, RestrictedLedger};
    use shared_types::{Address, BlockContext, CallContext, U256};

    use crate::fixtures::{ctx, AGENT, CHAIN_ID, COORDINATOR, GENESIS, LEDGER, OWNER};

    const HOLDERS: u64 = 4;

    fn holder(i: u64) -> Address {
        Address::from_low_u64(0x100 + i)
    }

    #[derive(Debug, Clone)]
    enum Op {
        Mint(u64, u64),
        Burn(u64, u64),
        Transfer(u64, u64, u64),
        Forced(u64, u64, u64),
        Freeze(u64, u64),
        Unfreeze(u64, u64),
        SetFrozen(u64, bool),
        Pause,
        Unpause,
        BatchMint(Vec<(u64, u64)>),
    }

    fn op() -> impl Strategy<Value = Op> {
        let who = 0..HOLDERS;
        let amt = 0u64..500;
        prop_oneof![
            (who.clone(), amt.clone()).prop_map(|(h, a)| Op::Mint(h, a)),
            (who.clone(), amt.clone()).prop_map(|(h, a)| Op::Burn(h, a)),
            (who.clone(), who.clone(), amt.clone()).prop_map(|(f, t, a)| Op::Transfer(f, t, a)),
            (who.clone(), who.clone(), amt.clone()).prop_map(|(f, t, a)| Op::Forced(f, t, a)),
            (who.clone(), amt.clone()).prop_map(|(h, a)| Op::Freeze(h, a)),
            (who.clone(), amt.clone()).prop_map(|(h, a)| Op::Unfreeze(h, a)),
            (who.clone(), any::<bool>()).prop_map(|(h, f)| Op::SetFrozen(h, f)),
            Just(Op::Pause),
            Just(Op::Unpause),
            prop::collection::vec((who, amt), 1..4).prop_map(Op::BatchMint),
        ]
    }

    fn ledger_with(verdict: bool) -> (RestrictedLedger, Arc<FixedVerdictModule>) {
        let coordinator = Arc::new(ComplianceCoordinator::new(
            COORDINATOR,
            OWNER,
            CoordinatorConfig::default(),
        ));
        let module = Arc::new(FixedVerdictModule::new(
            Address::from_low_u64(0xF1),
            "fixed",
            verdict,
        ));
        coordinator
            .add_module(&ctx(OWNER), module.clone())
            .expect("module binds");
        let mut ledger = RestrictedLedger::initialize(
            LEDGER,
            OWNER,
            LedgerConfig::default(),
            coordinator,
            &BlockContext::at(GENESIS, CHAIN_ID),
        )
        .expect("ledger initializes");
        ledger.add_agent(&ctx(OWNER), AGENT).expect("agent added");
        (ledger, module)
    }

    fn apply(ledger: &mut RestrictedLedger, op: &Op) -> Result<(), LedgerError> {
        let agent = ctx(AGENT);
        let sender = |i: u64| CallContext::new(holder(i), BlockContext::at(GENESIS, CHAIN_ID));
        match *op {
            Op::Mint(h, a) => ledger.mint(&agent, holder(h), U256::from(a)),
            Op::Burn(h, a) => ledger.burn(&agent, holder(h), U256::from(a)),
            Op::Transfer(f, t, a) => ledger.transfer(&sender(f), holder(t), U256::from(a)),
            Op::Forced(f, t, a) => ledger.forced_transfer(&agent, holder(f), holder(t), U256::from(a)),
            Op::Freeze(h, a) => ledger.freeze_partial(&agent, holder(h), U256::from(a)),
            Op::Unfreeze(h, a) => ledger.unfreeze_partial(&agent, holder(h), U256::from(a)),
            Op::SetFrozen(h, f) => ledger.set_frozen(&agent, holder(h), f),
            Op::Pause => ledger.pause(&agent),
            Op::Unpause => ledger.unpause(&agent),
            Op::BatchMint(ref items) => {
                let items: Vec<_> = items
                    .iter()
                    .map(|&(h, a)| (holder(h), U256::from(a)))
                    .collect();
                ledger.batch_mint(&agent, &items)
            }
        }
    }

    fn balance_sum(state: &LedgerState) -> U256 {
        state
            .accounts()
            .fold(U256::zero(), |sum, (_, account)| sum + account.balance)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_conservation_and_frozen_invariant(ops in prop::collection::vec(op(), 1..40)) {
            let (mut ledger, _) = ledger_with(true);
            for op in &ops {
                let before = ledger.state().clone();
                let events_before = ledger.events().len();
                if apply(&mut ledger, op).is_err() {
                    prop_assert_eq!(ledger.state(), &before, "failed {:?} changed state", op);
                    prop_assert_eq!(ledger.events().len(), events_before);
                }
                let state = ledger.state();
                prop_assert_eq!(balance_sum(state), state.total_supply());
                for (_, account) in state.accounts() {
                    prop_assert!(account.frozen <= account.balance);
                }
                prop_assert!(state.invariants_hold());
            }
        }

        #[test]
        fn prop_rejecting_module_blocks_every_balance_change(ops in prop::collection::vec(op(), 1..40)) {
            let (mut ledger, module) = ledger_with(false);
            for op in &ops {
                let _ = apply(&mut ledger, op);
            }
            prop_assert_eq!(ledger.total_supply(), U256::zero());
            prop_assert_eq!(ledger.state().accounts().count(), 0);
            prop_assert_eq!(module.mints() + module.transfers() + module.burns(), 0);
        }

        #[test]
        fn prop_forced_transfer_never_exceeds_balance(
            minted in 1u64..1_000,
            frozen_pct in 0u64..=100,
            requested in 0u64..2_000,
        ) {
            let (mut ledger, _) = ledger_with(true);
            let agent = ctx(AGENT);
            ledger.mint(&agent, holder(0), U256::from(minted)).expect("mint");
            ledger
                .freeze_partial(&agent, holder(0), U256::from(minted * frozen_pct / 100))
                .expect("freeze");

            let result = ledger.forced_transfer(&agent, holder(0), holder(1), U256::from(requested));
            prop_assert_eq!(result.is_ok(), requested <= minted);
            let state = ledger.state();
            prop_assert!(state.frozen_amount(holder(0)) <= state.balance_of(holder(0)));
            prop_assert_eq!(state.total_supply(), U256::from(minted));
        }
    }
}
