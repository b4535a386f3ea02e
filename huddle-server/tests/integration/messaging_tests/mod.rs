mod test_chat_ordering;
