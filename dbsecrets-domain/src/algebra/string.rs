pub trait StringExt {
    fn snake_case(&self) -> String;
}

impl StringExt for str {
    fn snake_case(&self) -> String {
        let mut snake_case = String::with_capacity(self.len());

        for (i, c) in self.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                snake_case.push('_');
            }
            snake_case.push(c.to_ascii_lowercase());
        }

        snake_case
    }
}
