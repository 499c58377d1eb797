mod test_level;
mod test_properties;
mod test_session;
