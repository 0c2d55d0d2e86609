pub mod handlers;
pub mod middleware;
pub mod router;

#[cfg(test)]
mod test_support;
