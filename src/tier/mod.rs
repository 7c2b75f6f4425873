pub(crate) mod matcher;
