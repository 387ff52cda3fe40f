//! Forwarding functions against the test backend
