mod local_core;
