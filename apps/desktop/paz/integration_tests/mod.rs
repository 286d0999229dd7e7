mod client_commands;
