//! Civic Minds - behavioral decision core for city life-simulation citizens

pub mod city;
pub mod core;
pub mod entity;
pub mod rules;
pub mod simulation;
