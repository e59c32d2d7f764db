//! Role-scoped prompt construction.
//!
//! The prompt tells the AI service which intents the caller's role may
//! produce and which fields each one expects. It narrows what the model is
//! likely to return; the dispatcher still enforces the policy itself.

use crate::role::Role;

const PRODUCER_INSTRUCTION: &str = "\
You are assisting a PRODUCER.
PERMITTED ACTIONS:
1. 'createAsset': register a new product batch.
   Fields: assetId (invent one if missing), productType (e.g. Apple, Olive Oil), quantity (number), unit (e.g. kg, litres), origin (town).
2. 'updateStage': move a batch to a new supply chain stage.
   Fields: assetId, newStage.
3. 'deleteAsset': remove a batch.
   Fields: assetId.
4. 'queryAsset': look up a batch.
   Fields: assetId.";

const CONSUMER_INSTRUCTION: &str = "\
You are assisting a CONSUMER.
PERMITTED ACTIONS:
1. 'queryAsset': read the details or history of a batch.
   Fields: assetId.
A consumer CANNOT create, modify or delete anything. If the user asks to create, update or delete, answer with intent 'unauthorized' and a 'reason'.";

const UNKNOWN_INSTRUCTION: &str = "\
The user's role is not recognized. No actions are permitted.
Answer every request with intent 'unauthorized' and a 'reason'.";

const EXAMPLES: &str = r#"EXAMPLE CREATE OUTPUT: { "intent": "createAsset", "args": { "assetId": "FOOD123", "productType": "Apple", "quantity": "100", "unit": "kg", "origin": "Trento" } }
EXAMPLE QUERY OUTPUT: { "intent": "queryAsset", "args": { "assetId": "FOOD123" } }
EXAMPLE UNAUTHORIZED OUTPUT: { "intent": "unauthorized", "args": { "reason": "Consumers cannot create assets" } }"#;

/// The instruction block listing what `role` may ask for.
pub fn role_instruction(role: Role) -> &'static str {
    match role {
        Role::Producer => PRODUCER_INSTRUCTION,
        Role::Consumer => CONSUMER_INSTRUCTION,
        Role::Unknown => UNKNOWN_INSTRUCTION,
    }
}

/// Build the full prompt for one user utterance.
pub fn build_prompt(text: &str, role: Role) -> String {
    format!(
        "You are an assistant for a safe food supply chain ledger. Reply ONLY with one JSON object.\n\
         \n\
         The user is a {}.\n\
         {}\n\
         \n\
         {}\n\
         \n\
         USER: \"{}\"\n",
        role.as_str().to_uppercase(),
        role_instruction(role),
        EXAMPLES,
        text
    )
}
