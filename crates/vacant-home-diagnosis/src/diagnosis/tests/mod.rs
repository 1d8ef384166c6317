mod cascade;
mod common;
mod routing;
