//! End-to-end test suite for the moon widget.
