//! Whole-frame tests for the light renderer
