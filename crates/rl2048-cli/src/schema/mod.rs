pub(crate) mod agent_model;
pub(crate) mod replay_record;
