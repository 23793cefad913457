mod deferred;
mod formats;
mod properties;
mod traces;
