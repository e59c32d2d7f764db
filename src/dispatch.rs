//! Policy gate and routing.
//!
//! The dispatcher is the authoritative RBAC check. It runs on every intent
//! regardless of where it came from, so an AI reply that ignores its
//! role-scoped instructions still cannot reach an executor.
//!
//! Evaluation order:
//!
//! 1. `unauthorized` -> Unauthorized (the model refused on the caller's behalf)
//! 2. `error` -> SystemError (the model could not be reached or understood)
//! 3. name not in `Policy[role]` -> Unauthorized
//! 4. write intents -> TransactionExecutor
//! 5. `queryAsset` -> QueryExecutor
//! 6. anything else -> Unrecognized

use crate::intent::{Intent, names};
use crate::ledger::{LedgerInvoker, QueryExecutor, TransactionExecutor};
use crate::outcome::Outcome;
use crate::policy::Policy;
use crate::role::Role;
use tracing::{info, warn};

const DEFAULT_REFUSAL: &str = "action not permitted";
const DEFAULT_AI_FAILURE: &str = "the AI service could not interpret the request";
const ROLE_DENIED: &str = "role not permitted for this action";

/// Routes intents to executors after the policy check.
#[derive(Debug, Clone)]
pub struct Dispatcher<W, R> {
    policy: Policy,
    transactions: TransactionExecutor<W>,
    queries: QueryExecutor<R>,
}

impl<W: LedgerInvoker, R: LedgerInvoker> Dispatcher<W, R> {
    pub fn new(policy: Policy, transactions: TransactionExecutor<W>, queries: QueryExecutor<R>) -> Self {
        Self {
            policy,
            transactions,
            queries,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Produce exactly one outcome for `intent` on behalf of `role`.
    pub fn dispatch(&self, intent: &Intent, role: Role) -> Outcome {
        let outcome = self.route(intent, role);
        info!(%role, intent = %intent.name, outcome = outcome.kind(), "dispatched");
        outcome
    }

    /// Read path for callers that already hold a query intent. Reads are
    /// open to every caller, so no policy lookup happens here.
    pub fn lookup(&self, intent: &Intent) -> Outcome {
        self.queries.evaluate(&intent.args)
    }

    fn route(&self, intent: &Intent, role: Role) -> Outcome {
        match intent.name.as_str() {
            names::UNAUTHORIZED => Outcome::Unauthorized(intent.arg_or("reason", DEFAULT_REFUSAL)),
            names::ERROR => Outcome::SystemError(intent.arg_or("reason", DEFAULT_AI_FAILURE)),
            name if !self.policy.allows(role, name) => {
                warn!(%role, intent = name, "denied by policy");
                Outcome::Unauthorized(ROLE_DENIED.to_string())
            }
            name if names::is_write(name) => self.transactions.submit(intent, role),
            names::QUERY_ASSET => self.queries.evaluate(&intent.args),
            other => Outcome::Unrecognized(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeLedger, RecordingInvoker};
    use serde_json::json;

    fn dispatcher<'a>(
        policy: Policy,
        writes: &'a RecordingInvoker,
        reads: &'a RecordingInvoker,
    ) -> Dispatcher<&'a RecordingInvoker, &'a RecordingInvoker> {
        Dispatcher::new(policy, TransactionExecutor::new(writes), QueryExecutor::new(reads))
    }

    const VOCABULARY: [&str; 5] = [
        names::CREATE_ASSET,
        names::UPDATE_STAGE,
        names::DELETE_ASSET,
        names::QUERY_ASSET,
        "transferAsset",
    ];

    #[test]
    fn unauthorized_iff_not_in_policy_for_every_role_and_name() {
        let policy = Policy::standard();
        for role in Role::all() {
            for name in VOCABULARY {
                let writes = RecordingInvoker::succeeding_write();
                let reads = RecordingInvoker::with_output(Some(0), "{}", "");
                let d = dispatcher(policy.clone(), &writes, &reads);

                let outcome = d.dispatch(&Intent::new(name).with_arg("assetId", "A1"), role);

                let denied = matches!(outcome, Outcome::Unauthorized(_));
                assert_eq!(denied, !policy.allows(role, name), "{} / {}", role, name);
                if denied {
                    assert!(writes.calls().is_empty(), "{} / {} reached writer", role, name);
                    assert!(reads.calls().is_empty(), "{} / {} reached reader", role, name);
                }
            }
        }
    }

    #[test]
    fn consumer_create_is_denied_without_invoking_writer() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "", "");
        let d = dispatcher(Policy::standard(), &writes, &reads);

        let intent = Intent::new(names::CREATE_ASSET).with_arg("assetId", "A1");
        let outcome = d.dispatch(&intent, Role::Consumer);

        assert_eq!(outcome, Outcome::Unauthorized(ROLE_DENIED.to_string()));
        assert!(writes.calls().is_empty());
    }

    #[test]
    fn unauthorized_intent_uses_its_reason() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "", "");
        let d = dispatcher(Policy::standard(), &writes, &reads);

        let outcome = d.dispatch(
            &Intent::new(names::UNAUTHORIZED).with_arg("reason", "Consumers cannot create assets"),
            Role::Consumer,
        );
        assert_eq!(outcome, Outcome::Unauthorized("Consumers cannot create assets".to_string()));

        let outcome = d.dispatch(&Intent::new(names::UNAUTHORIZED), Role::Producer);
        assert_eq!(outcome, Outcome::Unauthorized(DEFAULT_REFUSAL.to_string()));
        assert!(writes.calls().is_empty());
        assert!(reads.calls().is_empty());
    }

    #[test]
    fn error_intent_is_system_error_without_executor_call() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "", "");
        let d = dispatcher(Policy::standard(), &writes, &reads);

        let outcome = d.dispatch(&Intent::error("parse failure"), Role::Producer);
        assert_eq!(outcome, Outcome::SystemError("parse failure".to_string()));

        let outcome = d.dispatch(&Intent::new(names::ERROR), Role::Producer);
        assert_eq!(outcome, Outcome::SystemError(DEFAULT_AI_FAILURE.to_string()));
        assert!(writes.calls().is_empty());
        assert!(reads.calls().is_empty());
    }

    #[test]
    fn unknown_intent_is_denied_by_policy() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "", "");
        let d = dispatcher(Policy::standard(), &writes, &reads);

        let outcome = d.dispatch(&Intent::new(names::UNKNOWN), Role::Producer);

        assert!(matches!(outcome, Outcome::Unauthorized(_)));
    }

    #[test]
    fn granted_but_unrouted_name_is_unrecognized() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "", "");
        let policy = Policy::from_grants([(Role::Producer, vec!["transferAsset"])]);
        let d = dispatcher(policy, &writes, &reads);

        let outcome = d.dispatch(&Intent::new("transferAsset"), Role::Producer);

        assert_eq!(outcome, Outcome::Unrecognized("transferAsset".to_string()));
        assert!(writes.calls().is_empty());
    }

    #[test]
    fn producer_writes_go_to_writer_and_queries_to_reader() {
        let writes = RecordingInvoker::succeeding_write();
        let reads = RecordingInvoker::with_output(Some(0), "record", "");
        let d = dispatcher(Policy::standard(), &writes, &reads);

        d.dispatch(&Intent::new(names::DELETE_ASSET).with_arg("assetId", "A1"), Role::Producer);
        d.dispatch(&Intent::new(names::QUERY_ASSET).with_arg("assetId", "A1"), Role::Producer);

        assert_eq!(writes.calls(), vec![vec!["delete", "A1", "producer"]]);
        assert_eq!(reads.calls(), vec![vec!["query", "A1"]]);
    }

    #[test]
    fn created_asset_can_be_queried_back() {
        let ledger = FakeLedger::default();
        let d = Dispatcher::new(
            Policy::standard(),
            TransactionExecutor::new(&ledger),
            QueryExecutor::new(&ledger),
        );
        let create = Intent {
            name: names::CREATE_ASSET.to_string(),
            args: json!({"assetId": "FOOD123", "productType": "Mela", "quantity": "100", "unit": "kg", "origin": "Trento"})
                .as_object()
                .cloned()
                .unwrap(),
        };

        let created = d.dispatch(&create, Role::Producer);
        let found = d.dispatch(
            &Intent::new(names::QUERY_ASSET).with_arg("assetId", "FOOD123"),
            Role::Consumer,
        );

        assert!(created.is_success());
        match found {
            Outcome::Success(payload) => {
                let record: serde_json::Value = serde_json::from_str(&payload).unwrap();
                assert_eq!(record["assetId"], "FOOD123");
                assert_eq!(record["origin"], "Trento");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_create_surfaces_ledger_reason() {
        let ledger = FakeLedger::default();
        let d = Dispatcher::new(
            Policy::standard(),
            TransactionExecutor::new(&ledger),
            QueryExecutor::new(&ledger),
        );
        let create = Intent::new(names::CREATE_ASSET).with_arg("assetId", "DUP1");

        assert!(d.dispatch(&create, Role::Producer).is_success());
        match d.dispatch(&create, Role::Producer) {
            Outcome::FabricError(message) => assert!(message.contains("already exists")),
            other => panic!("expected fabric error, got {:?}", other),
        }
    }

    #[test]
    fn stage_update_is_visible_to_later_queries() {
        let ledger = FakeLedger::default();
        let d = Dispatcher::new(
            Policy::standard(),
            TransactionExecutor::new(&ledger),
            QueryExecutor::new(&ledger),
        );
        let update = Intent::new(names::UPDATE_STAGE)
            .with_arg("assetId", "FOOD123")
            .with_arg("newStage", "Consegnato");

        match d.dispatch(&update, Role::Producer) {
            Outcome::FabricError(message) => assert!(message.contains("does not exist")),
            other => panic!("expected fabric error, got {:?}", other),
        }

        assert!(d.dispatch(&Intent::new(names::CREATE_ASSET).with_arg("assetId", "FOOD123"), Role::Producer).is_success());
        assert_eq!(
            d.dispatch(&update, Role::Producer),
            Outcome::Success("Asset FOOD123 updated to stage Consegnato.".to_string())
        );

        match d.dispatch(&Intent::new(names::QUERY_ASSET).with_arg("assetId", "FOOD123"), Role::Consumer) {
            Outcome::Success(payload) => {
                let record: serde_json::Value = serde_json::from_str(&payload).unwrap();
                assert_eq!(record["currentStage"], "Consegnato");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }
}
