//! Single-step dispatch.
//!
//! Maps one [`MockRequest`] onto the matching [`DynamicMock`] operation.
//! Value parsing happens here, so a malformed value fails its step before the
//! mock sees anything.

use crate::protocol::{MockRequest, MockResponse};
use crate::replay::parser::{parse_type_arg, ValueParser};
use crate::Result;
use sleight_mock::{DynamicMock, Invocation};
use tracing::debug;

/// Apply `request` (step number `step`) to `mock`.
#[tracing::instrument(skip_all, fields(step = step, op = request.op(), member = request.member()))]
pub fn invoke_step(
    mock: &DynamicMock,
    parser: &mut ValueParser,
    step: usize,
    request: &MockRequest,
) -> Result<MockResponse> {
    let response = match request {
        MockRequest::Stub {
            member,
            parameters,
            returns,
        } => {
            let response = parser.parse(step, returns)?;
            let builder = mock.stub(member.as_str());
            match parameters {
                Some(parameters) => {
                    let parameters = parser.parse_all(step, parameters)?;
                    builder.with_parameters(parameters).returns(response);
                }
                None => builder.returns(response),
            }
            MockResponse::Stubbed
        }
        MockRequest::Call {
            member,
            args,
            type_args,
        } => {
            let args = parser.parse_all(step, args)?;
            let invocation = Invocation::call(member.as_str())
                .args(args)
                .type_args(type_args.iter().map(|name| parse_type_arg(name)));
            MockResponse::Value {
                value: mock.intercept(invocation),
            }
        }
        MockRequest::Get { member } => MockResponse::Value {
            value: mock.get(member),
        },
        MockRequest::Set { member, value } => {
            let value = parser.parse(step, value)?;
            mock.set(member, value);
            MockResponse::Assigned
        }
        MockRequest::ExecutionFor { member } => MockResponse::Execution {
            record: mock.execution_for(member),
        },
        MockRequest::ExecutionsFor { member } => MockResponse::Executions {
            records: mock.executions_for(member),
        },
    };

    debug!(?response, "Step applied");
    Ok(response)
}
