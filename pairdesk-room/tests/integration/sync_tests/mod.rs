mod test_last_writer_wins;
