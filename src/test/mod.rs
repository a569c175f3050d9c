mod test_populate;
mod test_generate;
