mod test_disconnect_before_join;
mod test_leave_notifies_room;
mod test_room_lifecycle;
