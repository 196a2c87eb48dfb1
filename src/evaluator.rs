use crate::ast::Expr;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::{DlError, Span};
use crate::value::Value;

/// Tree-walking evaluator over one shared `Environment`.
pub struct Evaluator {
    environment: Environment,
    depth: usize,
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            environment: Environment::new(),
            depth: 0,
            max_depth: config.max_eval_depth,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, DlError> {
        if self.depth >= self.max_depth {
            return Err(DlError::resource_exhausted(*expr.span(), self.max_depth));
        }

        self.depth += 1;
        let result = self.evaluate_expression(expr);
        self.depth -= 1;
        result
    }

    fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value, DlError> {
        match expr {
            Expr::Val { value, .. } => Ok(Value::Int(*value)),
            Expr::Var { name, span } => self
                .environment
                .get(name)
                .ok_or_else(|| DlError::unbound(*span, name)),
            Expr::Add { left, right, span } => {
                let left_val = self.evaluate_int(left)?;
                let right_val = self.evaluate_int(right)?;
                left_val
                    .checked_add(right_val)
                    .map(Value::Int)
                    .ok_or_else(|| DlError::overflow(*span, left_val, right_val))
            }
            Expr::If {
                left,
                right,
                then_branch,
                else_branch,
                ..
            } => {
                let left_val = self.evaluate_int(left)?;
                let right_val = self.evaluate_int(right)?;
                if left_val > right_val {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
            Expr::Let {
                name, value, body, ..
            } => {
                let val = self.evaluate(value)?;
                self.environment.bind(name, val);
                self.evaluate(body)
            }
            Expr::Function { param, body, .. } => Ok(Value::Function {
                param: param.clone(),
                body: body.clone(),
            }),
            Expr::Call {
                callee, argument, ..
            } => self.evaluate_call(callee, argument),
            Expr::Set { name, value, .. } => {
                let val = self.evaluate(value)?;
                self.environment.bind(name, val.clone());
                Ok(val)
            }
            Expr::Block { exprs, span } => self.evaluate_block(exprs, *span),
            Expr::Arr { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element)?);
                }
                Ok(Value::Array(values))
            }
            Expr::Gen {
                length,
                function,
                span,
            } => self.evaluate_gen(length, function, *span),
            Expr::At { array, index, span } => self.evaluate_at(array, index, *span),
        }
    }

    fn evaluate_int(&mut self, expr: &Expr) -> Result<i64, DlError> {
        match self.evaluate(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(DlError::type_error(
                *expr.span(),
                format!("Expected an integer, got {}", other.type_name()),
            )),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, argument: &Expr) -> Result<Value, DlError> {
        let (param, body) = match self.evaluate(callee)? {
            Value::Function { param, body } => (param, body),
            other => {
                return Err(DlError::type_error_with_help(
                    *callee.span(),
                    format!("Called a non-function ({})", other.type_name()),
                    "Only values built with (function ID BODY) can be called.".to_string(),
                ))
            }
        };

        // Calling through a name also requires that name to still be bound.
        if let Expr::Var { name, span } = callee {
            if !self.environment.contains(name) {
                return Err(DlError::unbound(*span, name));
            }
        }

        let arg = self.evaluate(argument)?;
        log::trace!("call function {} with {}", param, arg);
        self.environment.bind(&param, arg);
        self.evaluate(&body)
    }

    fn evaluate_block(&mut self, exprs: &[Expr], span: Span) -> Result<Value, DlError> {
        let (last, init) = exprs.split_last().ok_or_else(|| {
            DlError::parse_error(span, "A block needs at least one expression".to_string())
        })?;

        for expr in init {
            self.evaluate(expr)?;
        }
        self.evaluate(last)
    }

    fn evaluate_gen(&mut self, length: &Expr, function: &Expr, span: Span) -> Result<Value, DlError> {
        let n = self.evaluate_int(length)?;
        if n < 0 {
            return Err(DlError::type_error(
                *length.span(),
                format!("Cannot generate an array of negative length {}", n),
            ));
        }

        let mut values = Vec::new();
        for i in 0..n {
            // Each element is `(call FUNC (val i))`, so FUNC is re-evaluated every time.
            let call = Expr::Call {
                callee: Box::new(function.clone()),
                argument: Box::new(Expr::Val { value: i, span }),
                span,
            };
            values.push(self.evaluate(&call)?);
        }
        Ok(Value::Array(values))
    }

    fn evaluate_at(&mut self, array: &Expr, index: &Expr, span: Span) -> Result<Value, DlError> {
        let mut items = match self.evaluate(array)? {
            Value::Array(items) => items,
            other => {
                return Err(DlError::type_error(
                    *array.span(),
                    format!("Expected an array to index, got {}", other.type_name()),
                ))
            }
        };
        let i = self.evaluate_int(index)?;

        match usize::try_from(i) {
            Ok(pos) if pos < items.len() => Ok(items.swap_remove(pos)),
            _ => Err(DlError::index_out_of_range(span, i, items.len())),
        }
    }
}
